use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Role partitions, in evaluation priority order.
///
/// Bypass members skip rule evaluation entirely; the remaining kinds are
/// evaluated top to bottom, so an opinion held by a more niche kind
/// (context beats common, common beats authenticated, ...) wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleKind {
    Bypass = 0,
    Context = 1,
    Common = 2,
    Authenticated = 3,
    Anonymous = 4,
}

impl RoleKind {
    /// Every kind, in priority order.
    pub const ALL: [Self; 5] = [
        Self::Bypass,
        Self::Context,
        Self::Common,
        Self::Authenticated,
        Self::Anonymous,
    ];

    /// The kinds participating in rule evaluation (bypass resolves during
    /// preflight and never reaches evaluation).
    pub const CHECK_ORDER: [Self; 4] = [
        Self::Context,
        Self::Common,
        Self::Authenticated,
        Self::Anonymous,
    ];
}

/// Membership check run for context roles against the concrete session
/// and resource (e.g. "is the caller the record owner").
pub type ContextCheck = Arc<dyn Fn(&Session, &str) -> bool + Send + Sync>;

/// A role known to the access-control service.
#[derive(Clone)]
pub struct Role {
    id: u64,
    handle: String,
    kind: RoleKind,
    check: Option<ContextCheck>,
}

impl Role {
    /// A regular membership role.
    #[must_use]
    pub fn common(id: u64, handle: impl Into<String>) -> Self {
        Self::with_kind(id, handle, RoleKind::Common)
    }

    /// A role whose members skip rule evaluation entirely.
    #[must_use]
    pub fn bypass(id: u64, handle: impl Into<String>) -> Self {
        Self::with_kind(id, handle, RoleKind::Bypass)
    }

    /// The role every authenticated session holds implicitly.
    #[must_use]
    pub fn authenticated(id: u64, handle: impl Into<String>) -> Self {
        Self::with_kind(id, handle, RoleKind::Authenticated)
    }

    /// The role anonymous sessions hold implicitly.
    #[must_use]
    pub fn anonymous(id: u64, handle: impl Into<String>) -> Self {
        Self::with_kind(id, handle, RoleKind::Anonymous)
    }

    /// A contextual role; membership is decided per resource by `check`.
    #[must_use]
    pub fn context(id: u64, handle: impl Into<String>, check: ContextCheck) -> Self {
        Self {
            id,
            handle: handle.into(),
            kind: RoleKind::Context,
            check: Some(check),
        }
    }

    fn with_kind(id: u64, handle: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            id,
            handle: handle.into(),
            kind,
            check: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    #[must_use]
    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// True when the session holds this role for the given resource.
    #[must_use]
    pub fn applies(&self, session: &Session, resource: &str) -> bool {
        match self.kind {
            RoleKind::Bypass | RoleKind::Common => session.is_member(self.id),
            RoleKind::Authenticated => session.is_authenticated(),
            RoleKind::Anonymous => !session.is_authenticated(),
            RoleKind::Context => {
                session.is_member(self.id)
                    && self
                        .check
                        .as_ref()
                        .is_some_and(|check| check(session, resource))
            }
        }
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Role")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The caller a check runs for: identity plus role memberships.
///
/// Identity 0 denotes an anonymous session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: u64,
    roles: HashSet<u64>,
}

impl Session {
    #[must_use]
    pub fn new(identity: u64, roles: impl IntoIterator<Item = u64>) -> Self {
        Self {
            identity,
            roles: roles.into_iter().collect(),
        }
    }

    /// An anonymous session holding the given roles.
    #[must_use]
    pub fn anonymous(roles: impl IntoIterator<Item = u64>) -> Self {
        Self::new(0, roles)
    }

    #[must_use]
    pub fn identity(&self) -> u64 {
        self.identity
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity != 0
    }

    #[must_use]
    pub fn is_member(&self, role_id: u64) -> bool {
        self.roles.contains(&role_id)
    }

    #[must_use]
    pub fn roles(&self) -> &HashSet<u64> {
        &self.roles
    }
}

/// Role IDs effective for one check, partitioned by kind.
#[derive(Debug, Clone, Default)]
pub struct PartRoles([HashSet<u64>; 5]);

impl PartRoles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RoleKind, role_id: u64) {
        self.0[kind as usize].insert(role_id);
    }

    #[must_use]
    pub fn get(&self, kind: RoleKind) -> &HashSet<u64> {
        &self.0[kind as usize]
    }

    /// True when at least one role of the kind is present.
    #[must_use]
    pub fn has(&self, kind: RoleKind) -> bool {
        !self.0[kind as usize].is_empty()
    }

    /// Number of kinds with at least one member.
    #[must_use]
    pub fn kinds_present(&self) -> usize {
        self.0.iter().filter(|s| !s.is_empty()).count()
    }

    /// All role IDs across kinds.
    #[must_use]
    pub fn all_ids(&self) -> Vec<u64> {
        let mut out: Vec<u64> = self.0.iter().flatten().copied().collect();
        out.sort_unstable();
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(HashSet::is_empty)
    }
}

/// Partitions the roles effective for a session on a resource.
#[must_use]
pub fn eval_roles(session: &Session, resource: &str, roles: &[Role]) -> PartRoles {
    let mut out = PartRoles::new();

    for role in roles {
        if role.applies(session, resource) {
            out.insert(role.kind(), role.id());
        }
    }

    out
}

/// Counts roles per kind; used for update logging.
#[must_use]
pub fn stat_roles(roles: &[Role]) -> [usize; 5] {
    let mut out = [0; 5];

    for role in roles {
        out[role.kind() as usize] += 1;
    }

    out
}

/// Roles present in `current` but missing from `next`.
#[must_use]
pub fn removed_roles<'a>(current: &'a [Role], next: &[Role]) -> Vec<&'a Role> {
    current
        .iter()
        .filter(|c| !next.iter().any(|n| n.id() == c.id()))
        .collect()
}
