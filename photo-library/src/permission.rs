//! Permission gate for save requests.
//!
//! A save may only reach the writer once the storage permission is known to
//! be held. When it is not, the request is parked in a single pending slot
//! until the platform reports the user's answer.
//!
//! ```text
//! Idle -> AuthorizationChecked -> Authorized
//!                              -> AwaitingGrant -> Granted -> Authorized
//!                                               -> Denied  -> Failed
//! ```

/// One entry of the platform's grant result array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantResult {
    Granted,
    Denied,
}

impl GrantResult {
    /// Android `PackageManager` codes: `0` granted, anything else denied
    pub fn from_android_code(code: i32) -> Self {
        if code == 0 {
            GrantResult::Granted
        } else {
            GrantResult::Denied
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    AuthorizationChecked,
    AwaitingGrant,
    /// Transitional; `resolve` moves straight on to `Authorized`, so
    /// `state()` never reports it.
    Granted,
    /// Transitional; `resolve` moves straight on to `Failed`, so `state()`
    /// never reports it.
    Denied,
    Authorized,
    Failed,
}

/// Outcome of handing a request to the gate
#[derive(Debug, PartialEq)]
pub enum Admission<T> {
    /// Authorized, run the request now
    Proceed(T),
    /// Parked until the grant callback arrives
    Deferred {
        /// Request that was waiting in the slot and has now been replaced
        superseded: Option<T>,
        /// Whether the caller has to ask the platform for permission. False
        /// when a request for an earlier save is still outstanding.
        request_permission: bool,
    },
}

/// Outcome of a grant callback
#[derive(Debug, PartialEq)]
pub enum Resolution<T> {
    Granted(T),
    Denied(T),
    /// Callback without a parked request, nothing to resume
    NothingPending,
}

#[derive(Debug)]
pub struct PermissionGate<T> {
    state: GateState,
    pending: Option<T>,
}

impl<T> Default for PermissionGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PermissionGate<T> {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Checks a new request against the current authorization.
    ///
    /// `enforced` is whether the platform version requires the permission at
    /// all, `held` whether it is already granted.
    pub fn admit(&mut self, request: T, enforced: bool, held: bool) -> Admission<T> {
        let waiting = self.state == GateState::AwaitingGrant;
        self.state = GateState::AuthorizationChecked;

        if !enforced || held {
            self.state = GateState::Authorized;
            log::debug!("Storage permission not required or already granted");
            if waiting {
                // An earlier request is still parked; leave it for its callback.
                self.state = GateState::AwaitingGrant;
            }
            return Admission::Proceed(request);
        }

        let superseded = self.pending.replace(request);
        if superseded.is_some() {
            log::warn!("Replacing save request that was still waiting for permission");
        }
        self.state = GateState::AwaitingGrant;
        Admission::Deferred {
            superseded,
            request_permission: !waiting,
        }
    }

    /// Applies the platform's grant results to the parked request.
    ///
    /// Any denied entry denies the whole request. An empty result array has
    /// no denied entry and resumes the request.
    pub fn resolve(&mut self, results: &[GrantResult]) -> Resolution<T> {
        let Some(request) = self.pending.take() else {
            log::debug!("Permission result without a pending save request");
            return Resolution::NothingPending;
        };

        if results.iter().all(|r| *r == GrantResult::Granted) {
            log::debug!("User granted the storage permission");
            self.state = GateState::Authorized;
            Resolution::Granted(request)
        } else {
            log::debug!("Storage permission not granted by the user");
            self.state = GateState::Failed;
            Resolution::Denied(request)
        }
    }
}
