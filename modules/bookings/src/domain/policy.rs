//! Field- and operation-level authorization decisions.
//!
//! Pure functions over the caller context; storage lookups needed for a
//! decision are done by the resolver before calling in.

use crate::contract::caller::{
    CallerContext, ProfileSyncGrant, READ_APPOINTMENTS_DATA, READ_BARBER_DATA, UPDATE_BARBER,
};
use crate::contract::error::BookingsError;

/// Cheap pre-check for protected appointment fields, done before any storage lookup.
pub fn can_read_appointment_data(caller: &CallerContext) -> Result<&str, BookingsError> {
    match &caller.identity {
        Some(identity) if identity.has_permission(READ_APPOINTMENTS_DATA) => {
            Ok(identity.email.as_str())
        }
        _ => Err(BookingsError::unauthorized()),
    }
}

/// Protected appointment fields (`fullName`, `email`, `phoneNumber`).
///
/// `caller_barber_email` is the email of the barber found by looking up the
/// caller's own email, `None` when no such barber exists.
pub fn authorize_appointment_data(
    caller: &CallerContext,
    caller_barber_email: Option<&str>,
) -> Result<(), BookingsError> {
    let email = can_read_appointment_data(caller)?;
    match caller_barber_email {
        Some(barber_email) if barber_email == email => Ok(()),
        _ => Err(BookingsError::unauthorized()),
    }
}

/// A barber's `email` is visible only to that barber holding `read:barber_data`.
pub fn authorize_barber_email(
    caller: &CallerContext,
    barber_email: &str,
) -> Result<(), BookingsError> {
    match &caller.identity {
        Some(identity)
            if identity.has_permission(READ_BARBER_DATA) && identity.email == barber_email =>
        {
            Ok(())
        }
        _ => Err(BookingsError::unauthorized()),
    }
}

/// Gate for `updateBarber`: permission, management credential and provider domain are all required.
pub fn authorize_barber_update(caller: &CallerContext) -> Result<ProfileSyncGrant, BookingsError> {
    let identity = caller
        .identity
        .as_ref()
        .filter(|i| i.has_permission(UPDATE_BARBER))
        .ok_or_else(BookingsError::unauthorized)?;
    let token = caller
        .management_token
        .clone()
        .ok_or_else(BookingsError::unauthorized)?;
    let domain = caller
        .provider_domain
        .clone()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(BookingsError::unauthorized)?;

    Ok(ProfileSyncGrant {
        user_id: identity.id.clone(),
        token,
        domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::caller::{CallerIdentity, ManagementToken};

    fn caller(email: &str, perms: &[&str]) -> CallerContext {
        CallerContext::anonymous().with_identity(CallerIdentity {
            id: "auth0|42".into(),
            email: email.into(),
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        })
    }

    fn token() -> ManagementToken {
        ManagementToken {
            token_type: "Bearer".into(),
            access_token: "secret".into(),
        }
    }

    #[test]
    fn appointment_data_requires_permission_and_matching_barber() {
        let c = caller("bob@shop.test", &[READ_APPOINTMENTS_DATA]);
        assert!(authorize_appointment_data(&c, Some("bob@shop.test")).is_ok());
        assert_eq!(
            authorize_appointment_data(&c, None),
            Err(BookingsError::Unauthorized)
        );
        assert_eq!(
            authorize_appointment_data(&c, Some("alice@shop.test")),
            Err(BookingsError::Unauthorized)
        );

        let no_perm = caller("bob@shop.test", &[READ_BARBER_DATA]);
        assert_eq!(
            authorize_appointment_data(&no_perm, Some("bob@shop.test")),
            Err(BookingsError::Unauthorized)
        );
        assert_eq!(
            authorize_appointment_data(&CallerContext::anonymous(), Some("bob@shop.test")),
            Err(BookingsError::Unauthorized)
        );
    }

    #[test]
    fn barber_email_is_visible_only_to_its_owner() {
        let owner = caller("bob@shop.test", &[READ_BARBER_DATA]);
        assert!(authorize_barber_email(&owner, "bob@shop.test").is_ok());
        assert!(authorize_barber_email(&owner, "alice@shop.test").is_err());

        let without_perm = caller("bob@shop.test", &[]);
        assert!(authorize_barber_email(&without_perm, "bob@shop.test").is_err());
    }

    #[test]
    fn barber_update_needs_permission_token_and_domain() {
        let admin = caller("root@shop.test", &[UPDATE_BARBER]);

        assert!(authorize_barber_update(&admin).is_err());
        assert!(authorize_barber_update(&admin.clone().with_management(token(), "")).is_err());

        let mut no_domain = admin.clone();
        no_domain.management_token = Some(token());
        assert!(authorize_barber_update(&no_domain).is_err());

        let mut no_token = admin.clone();
        no_token.provider_domain = Some("https://id.shop.test".into());
        assert!(authorize_barber_update(&no_token).is_err());

        let not_admin = caller("bob@shop.test", &[READ_BARBER_DATA])
            .with_management(token(), "https://id.shop.test");
        assert_eq!(
            authorize_barber_update(&not_admin),
            Err(BookingsError::Unauthorized)
        );

        let grant = authorize_barber_update(
            &admin.with_management(token(), "https://id.shop.test"),
        )
        .unwrap();
        assert_eq!(grant.user_id, "auth0|42");
        assert_eq!(grant.domain, "https://id.shop.test");
        assert_eq!(grant.token.authorization_header(), "Bearer secret");
    }
}
