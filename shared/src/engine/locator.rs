use crate::types::Protocol;

/// Resource locator templates. The bootstrap composes these from the
/// root node's credentials and versions; no other network contract is in
/// scope.

pub fn engine_locator(protocol: Protocol, version: &str, credential_key: &str) -> String {
    format!("{protocol}://webapi.example.com/maps?v={version}&key={credential_key}")
}

pub fn ui_locator(protocol: Protocol, version: &str) -> String {
    format!("{protocol}://webapi.example.com/ui/{version}/main-async.js")
}

pub fn data_vis_locator(protocol: Protocol, version: &str, credential_key: &str) -> String {
    format!("{protocol}://webapi.example.com/datavis?key={credential_key}&v={version}")
}
