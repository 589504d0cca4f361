//! Authorization predicates shared by every operation: admin-only and
//! owner-or-admin. Handlers never check roles themselves.

use shared::{domain::Actor, errors::ServiceError};

pub fn ensure_admin(actor: Actor) -> Result<(), ServiceError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized("Unauthorized".into()))
    }
}

pub fn ensure_owner_or_admin(
    actor: Actor,
    owner_id: i32,
    message: &str,
) -> Result<(), ServiceError> {
    if actor.is_admin() || actor.owns(owner_id) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Role;

    #[test]
    fn admin_passes_both_checks() {
        let admin = Actor::new(1, Role::Admin);
        assert!(ensure_admin(admin).is_ok());
        assert!(ensure_owner_or_admin(admin, 99, "nope").is_ok());
    }

    #[test]
    fn member_is_limited_to_own_resources() {
        let member = Actor::new(7, Role::Member);
        assert!(ensure_admin(member).is_err());
        assert!(ensure_owner_or_admin(member, 7, "nope").is_ok());

        let err = ensure_owner_or_admin(member, 8, "You can only view your own orders");
        assert!(matches!(
            err,
            Err(ServiceError::Unauthorized(msg)) if msg == "You can only view your own orders"
        ));
    }
}
