//! Tool implementations.

use crate::context::{RenderContext, ToolEnv};
use async_trait::async_trait;
use swma_common::Result;

pub mod forecast;
pub mod goes;
pub mod imagery;
pub mod welcome;

pub use forecast::ForecastTool;
pub use goes::{GoesProtonTool, GoesXrayTool};
pub use imagery::{AiaTool, ImageSource, LascoTool};
pub use welcome::WelcomeTool;

/// One selectable monitor.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Fetches, renders and presents through `ctx`. Errors are returned
    /// unchanged; nothing is retried.
    async fn run(&self, env: &ToolEnv, ctx: &mut dyn RenderContext) -> Result<()>;
}
