use crate::error::AppError;

/// One stage of the diagnosis chain. Stages consume the context in one
/// typestate and hand it back in the next.
pub trait ProcessingStep<In, Out> {
    fn process(&self, context: In) -> Result<Out, AppError>;
    fn name(&self) -> &'static str;
}
