/// Liveness probe. Touches nothing.
pub async fn healthz() -> &'static str {
    "OK"
}
