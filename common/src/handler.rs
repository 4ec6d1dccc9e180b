//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Queries, commands and storage operations are all expressed as
/// [`Handler`]s of their argument types, so a single service may implement
/// it many times, once per supported operation.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
