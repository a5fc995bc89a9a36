//! Request dispatch: run configuration, worker planning and the transport.
mod dispatcher;
mod plan;
mod run_config;
mod transport;


pub use dispatcher::dispatch;
pub use plan::{Distribution, plan_workers};
pub use run_config::RunConfig;
pub use transport::{HttpTransport, Transport, build_client};
