mod error;
mod io;
mod rpc;
mod setup;
mod state;
mod transport;

pub use error::{NO_LINKS_PLACEHOLDER, render_tool_error, tool_not_found};
pub use io::run_with_io;
pub use rpc::{INSTRUCTIONS, LlmsTxtServer, SERVER_NAME};
pub use setup::build_state;
pub use state::AppState;
pub use transport::{build_server, run, run_sse, run_stdio};
