use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::Serialize;

/// A single calculator: validated input in, serializable result out.
pub trait Calculator: Validate {
    type Output: Serialize;

    /// Name used on the command line and in batch files.
    const NAME: &'static str;

    fn compute(&self) -> Result<Self::Output>;

    fn calculate(&self) -> Result<Self::Output> {
        self.validate()?;
        self.compute()
    }
}

/// Destination for batch output files.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Object-safe view of a [`Calculator`] with the output erased to JSON.
pub trait Evaluate {
    fn name(&self) -> &'static str;
    fn evaluate(&self) -> Result<serde_json::Value>;
}

impl<C: Calculator> Evaluate for C {
    fn name(&self) -> &'static str {
        C::NAME
    }

    fn evaluate(&self) -> Result<serde_json::Value> {
        let output = self.calculate()?;
        Ok(serde_json::to_value(output)?)
    }
}
