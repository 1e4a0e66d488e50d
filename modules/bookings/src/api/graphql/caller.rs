use axum::http::HeaderMap;

use crate::contract::caller::{CallerContext, CallerIdentity, ManagementToken};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_PERMISSIONS_HEADER: &str = "x-user-permissions";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Build the per-request caller context from the headers set by the authenticating edge.
///
/// The identity is present only when both id and email headers are.
pub fn caller_from_headers(
    headers: &HeaderMap,
    management: Option<&(ManagementToken, String)>,
) -> CallerContext {
    let mut caller = CallerContext::anonymous();

    if let (Some(id), Some(email)) = (
        header(headers, USER_ID_HEADER),
        header(headers, USER_EMAIL_HEADER),
    ) {
        let permissions = header(headers, USER_PERMISSIONS_HEADER)
            .map(|raw| {
                raw.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        caller = caller.with_identity(CallerIdentity {
            id: id.to_owned(),
            email: email.to_owned(),
            permissions,
        });
    }

    if let Some((token, domain)) = management {
        caller = caller.with_management(token.clone(), domain.clone());
    }
    caller
}
