/// Router Module Index
///
/// Splits the routing surface into the same three tiers the legacy service
/// used, so the access rules of each endpoint are visible from the module
/// it is registered in.

/// Routes accessible to any client: login, registration and every
/// announcement read path.
pub mod public;

/// Routes requiring a resolved identity. Protected by the `AuthUser`
/// extractor middleware layered above this module.
pub mod authenticated;

/// Reference-data and user management, nested under `/admin`. The legacy
/// service performs no privilege check here beyond reachability, and none
/// is added.
pub mod admin;
