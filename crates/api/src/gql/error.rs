use async_graphql::ErrorExtensions;

/// Converts any `Result<T, E>` where `E: Display` into `async_graphql::Result<T>`
/// with a contextual message prefix and a `VALIDATION_ERROR` code, matching
/// what resolvers report for bad input elsewhere.
///
/// Usage: `Uuid::parse_str(id).gql_err("Invalid guest ID")?`
pub trait ResultExt<T> {
    fn gql_err(self, context: &str) -> async_graphql::Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn gql_err(self, context: &str) -> async_graphql::Result<T> {
        self.map_err(|e| {
            async_graphql::Error::new(format!("{context}: {e}"))
                .extend_with(|_, ext| ext.set("code", "VALIDATION_ERROR"))
        })
    }
}
