use axum::{http::StatusCode, response::Html};

use optout::{Scope, TokenError, issue_unsubscribe_token};
use optout_axum::OPTOUT_ROUTE_PREFIX;

use crate::{DEMO_USER_ID, OPTOUT_PUBLIC_URL};

/// Footer link an email composer would embed for `user_id`
pub(crate) fn unsubscribe_link(user_id: &str, scope: Option<Scope>) -> Result<String, TokenError> {
    let token = issue_unsubscribe_token(user_id)?;
    let mut link = format!(
        "{}{}/unsubscribe?token={}",
        OPTOUT_PUBLIC_URL.as_str(),
        OPTOUT_ROUTE_PREFIX.as_str(),
        urlencoding::encode(&token)
    );
    if let Some(scope) = scope {
        link.push_str(&format!("&type={}", urlencoding::encode(scope.as_str())));
    }
    Ok(link)
}

/// Lists fresh unsubscribe links for the demo user
pub(crate) async fn index() -> Result<Html<String>, (StatusCode, String)> {
    let mut items = String::new();
    for (label, scope) in [
        ("Everything", Some(Scope::All)),
        ("Weekly digest", Some(Scope::Weekly)),
        ("New skill alerts", Some(Scope::Alerts)),
        ("No type (defaults to everything)", None),
    ] {
        let link = unsubscribe_link(DEMO_USER_ID, scope)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        items.push_str(&format!("<li>{label}: <a href=\"{link}\">{link}</a></li>\n"));
    }

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html><body>\n<h1>Unsubscribe links for {DEMO_USER_ID}</h1>\n<ul>\n{items}</ul>\n\
         <p>Current preferences: <code>curl -H 'X-Authenticated-User: {DEMO_USER_ID}' {}{}/preferences</code></p>\n\
         </body></html>\n",
        OPTOUT_PUBLIC_URL.as_str(),
        OPTOUT_ROUTE_PREFIX.as_str()
    )))
}
