use entities::{AutoError, Unit};

// Each command is atomic, so no state is threaded between the phases
pub trait Handler<Context> {
    fn load(&self) -> impl Future<Output = Result<Context, AutoError>>;

    /// Local checks only. Nothing here may reach the backend.
    fn validate(&self, ctx: &Context) -> impl Future<Output = Result<Unit, AutoError>>;

    fn run(&self, ctx: &Context) -> impl Future<Output = Result<Unit, AutoError>>;
}
