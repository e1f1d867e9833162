//! Fakes for every port, shared by the unit tests.

use crate::error::{FetchError, PlatformError, StorageError};
use crate::identity::ResolvedIdentity;
use crate::ports::{self, BoxFuture};
use crate::roster::{FetchedRoster, RosterOrigin};
use crate::types::{
    NotificationHandle, NotificationRequest, NotificationTicket, PermissionStatus, RosterSnapshot,
    ShiftEntry, StaffRecord,
};

use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;
use tokio::sync::oneshot;

pub(crate) fn shift(date: &str, start: &str) -> ShiftEntry {
    ShiftEntry {
        date: date.to_string(),
        weekday_label: "Senin".to_string(),
        start_time: start.to_string(),
        end_time: "17:00".to_string(),
        note: String::new(),
    }
}

pub(crate) fn staff(id: u32, name: &str, shifts: Vec<ShiftEntry>) -> StaffRecord {
    StaffRecord {
        id,
        full_name: name.to_string(),
        role: "Staf TU".to_string(),
        shifts,
    }
}

pub(crate) fn sample_snapshot() -> RosterSnapshot {
    RosterSnapshot {
        institution_name: "Kejaksaan Negeri Contoh".to_string(),
        period_label: "Januari".to_string(),
        year: 2099,
        staff: vec![
            staff(1, "Andi", vec![shift("2099-01-05", "08:00")]),
            staff(2, "Budi", vec![shift("2099-01-06", "08:00")]),
            staff(3, "Citra", vec![shift("2099-01-07", "13:00")]),
        ],
    }
}

pub(crate) fn sample_identity() -> ResolvedIdentity {
    let snapshot = sample_snapshot();
    ResolvedIdentity {
        staff: snapshot.staff[0].clone(),
        roster: FetchedRoster {
            snapshot,
            origin: RosterOrigin::Remote,
            fetched_at: datetime!(2099-01-01 00:00 UTC),
        },
    }
}

#[derive(Clone)]
pub(crate) struct TestTime {
    now: Arc<Mutex<OffsetDateTime>>,
    sleeps: Arc<Mutex<Vec<oneshot::Sender<()>>>>,
    durations: Arc<Mutex<Vec<Duration>>>,
}

impl TestTime {
    pub(crate) fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
            durations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn set_now(&self, now: OffsetDateTime) {
        *self.now.lock().expect("now lock") = now;
    }

    pub(crate) fn sleep_durations(&self) -> Vec<Duration> {
        self.durations.lock().expect("durations lock").clone()
    }

    pub(crate) fn trigger_all(&self) {
        let mut sends = self.sleeps.lock().expect("sleeps lock");
        for sender in sends.drain(..) {
            let _ = sender.send(());
        }
    }
}

pub(crate) struct ManualSleep {
    receiver: oneshot::Receiver<()>,
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(_) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl ports::TimeProvider for TestTime {
    type Sleep<'a>
        = ManualSleep
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime {
        *self.now.lock().expect("now lock")
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a> {
        let (sender, receiver) = oneshot::channel();
        self.durations
            .lock()
            .expect("durations lock")
            .push(duration);
        self.sleeps.lock().expect("sleeps lock").push(sender);
        ManualSleep { receiver }
    }
}

#[derive(Clone)]
enum RosterScript {
    Ok(RosterSnapshot),
    Status(u16),
    Hang,
}

#[derive(Clone)]
pub(crate) struct ScriptedRoster {
    script: Arc<Mutex<RosterScript>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedRoster {
    fn with(script: RosterScript) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub(crate) fn ok(snapshot: RosterSnapshot) -> Self {
        Self::with(RosterScript::Ok(snapshot))
    }

    pub(crate) fn status(code: u16) -> Self {
        Self::with(RosterScript::Status(code))
    }

    pub(crate) fn hanging() -> Self {
        Self::with(RosterScript::Hang)
    }

    pub(crate) fn respond_with(&self, snapshot: RosterSnapshot) {
        *self.script.lock().expect("script lock") = RosterScript::Ok(snapshot);
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

impl ports::RosterSource for ScriptedRoster {
    type Fut<'a>
        = BoxFuture<'a, Result<RosterSnapshot, FetchError>>
    where
        Self: 'a;

    fn fetch<'a>(&'a self) -> Self::Fut<'a> {
        *self.calls.lock().expect("calls lock") += 1;
        let script = self.script.lock().expect("script lock").clone();
        match script {
            RosterScript::Ok(snapshot) => Box::pin(std::future::ready(Ok(snapshot))),
            RosterScript::Status(code) => {
                Box::pin(std::future::ready(Err(FetchError::Status(code))))
            }
            RosterScript::Hang => Box::pin(std::future::pending()),
        }
    }
}

#[derive(Default)]
struct PlatformState {
    pending: Vec<NotificationTicket>,
    requests: Vec<NotificationRequest>,
    failing_keys: HashSet<String>,
    fail_cancel: bool,
    incapable: bool,
    status: Option<PermissionStatus>,
    prompt_answer: Option<PermissionStatus>,
    prompts: usize,
    cancel_calls: usize,
    next_id: u64,
}

/// In-memory notification platform that records every call.
#[derive(Clone, Default)]
pub(crate) struct RecordingPlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl RecordingPlatform {
    fn with_state<R>(&self, f: impl FnOnce(&mut PlatformState) -> R) -> R {
        let mut state = self.state.lock().expect("platform lock");
        f(&mut *state)
    }

    pub(crate) fn requests(&self) -> Vec<NotificationRequest> {
        self.with_state(|state| state.requests.clone())
    }

    pub(crate) fn pending(&self) -> Vec<NotificationTicket> {
        self.with_state(|state| state.pending.clone())
    }

    pub(crate) fn fail_on(&self, key: &str) {
        self.with_state(|state| state.failing_keys.insert(key.to_string()));
    }

    pub(crate) fn fail_cancel(&self, fail: bool) {
        self.with_state(|state| state.fail_cancel = fail);
    }

    pub(crate) fn cancel_calls(&self) -> usize {
        self.with_state(|state| state.cancel_calls)
    }

    pub(crate) fn set_capable(&self, capable: bool) {
        self.with_state(|state| state.incapable = !capable);
    }

    pub(crate) fn set_prompt_answer(&self, answer: PermissionStatus) {
        self.with_state(|state| state.prompt_answer = Some(answer));
    }

    pub(crate) fn permission_prompts(&self) -> usize {
        self.with_state(|state| state.prompts)
    }
}

impl ports::NotificationPlatform for RecordingPlatform {
    type Error = PlatformError;

    fn schedule<'a>(
        &'a self,
        request: &'a NotificationRequest,
    ) -> BoxFuture<'a, Result<NotificationHandle, Self::Error>> {
        let result = self.with_state(|state| {
            state.requests.push(request.clone());
            if state.failing_keys.contains(&request.shift_key.to_string()) {
                return Err(PlatformError::Rejected("scripted failure".to_string()));
            }
            state.next_id += 1;
            let handle = NotificationHandle(format!("test-{}", state.next_id));
            state.pending.push(NotificationTicket {
                shift_key: request.shift_key.clone(),
                handle: handle.clone(),
                fire_at: request.fire_at,
            });
            Ok(handle)
        });
        Box::pin(std::future::ready(result))
    }

    fn cancel_all(&self) -> BoxFuture<'_, Result<(), Self::Error>> {
        let result = self.with_state(|state| {
            state.cancel_calls += 1;
            if state.fail_cancel {
                return Err(PlatformError::Rejected("cancel refused".to_string()));
            }
            state.pending.clear();
            Ok(())
        });
        Box::pin(std::future::ready(result))
    }

    fn list_scheduled(&self) -> BoxFuture<'_, Result<Vec<NotificationTicket>, Self::Error>> {
        let pending = self.pending();
        Box::pin(std::future::ready(Ok(pending)))
    }
}

impl ports::PermissionPlatform for RecordingPlatform {
    fn is_capable_device(&self) -> bool {
        self.with_state(|state| !state.incapable)
    }

    fn permission_status(&self) -> BoxFuture<'_, PermissionStatus> {
        let status = self.with_state(|state| state.status.unwrap_or(PermissionStatus::Undetermined));
        Box::pin(std::future::ready(status))
    }

    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus> {
        let status = self.with_state(|state| {
            state.prompts += 1;
            let answer = state.prompt_answer.unwrap_or(PermissionStatus::Granted);
            state.status = Some(answer);
            answer
        });
        Box::pin(std::future::ready(status))
    }
}

/// Key-value store kept in memory; can be switched into a failing mode.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
    broken: Arc<Mutex<bool>>,
    read_only_keys: Arc<Mutex<HashSet<String>>>,
}

impl MemoryStore {
    pub(crate) fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("values lock")
            .insert(key.to_string(), value.to_string());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.lock().expect("values lock").is_empty()
    }

    pub(crate) fn set_broken(&self, broken: bool) {
        *self.broken.lock().expect("broken lock") = broken;
    }

    pub(crate) fn fail_writes_to(&self, key: &str) {
        self.read_only_keys
            .lock()
            .expect("read-only keys lock")
            .insert(key.to_string());
    }

    fn check_write(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        if self
            .read_only_keys
            .lock()
            .expect("read-only keys lock")
            .contains(key)
        {
            return Err(StorageError::Io(std::io::Error::other("key is read-only")));
        }
        Ok(())
    }

    fn check(&self) -> Result<(), StorageError> {
        if *self.broken.lock().expect("broken lock") {
            return Err(StorageError::Io(std::io::Error::other("store offline")));
        }
        Ok(())
    }
}

impl ports::KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        let result = self
            .check()
            .map(|()| self.values.lock().expect("values lock").get(key).cloned());
        Box::pin(std::future::ready(result))
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        let result = self.check_write(key).map(|()| self.insert(key, value));
        Box::pin(std::future::ready(result))
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        let result = self.check().map(|()| {
            self.values.lock().expect("values lock").remove(key);
        });
        Box::pin(std::future::ready(result))
    }
}
