/// Deployment allowlist
///
/// The public hostname must contain one of the allowed fragments. An empty
/// hostname never matches.
pub fn is_allowed_host(host: &str, allowed: &[String]) -> bool {
    let host = host.trim().to_lowercase();
    if host.is_empty() {
        return false;
    }
    allowed
        .iter()
        .map(|fragment| fragment.trim().to_lowercase())
        .any(|fragment| !fragment.is_empty() && host.contains(&fragment))
}
