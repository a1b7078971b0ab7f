//! Portal engine: GraphQL IO, collection fetching and mutation dispatch.
mod collection;
mod dispatcher;
mod engine;
mod persist;
mod resources;
mod transport;
mod types;

pub use collection::{FetchSnapshot, RemoteCollection};
pub use dispatcher::MutationDispatcher;
pub use engine::{EngineEvent, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use resources::{ActionItemCategories, ActionItems, CampaignPledges, Resource};
pub use transport::{GraphqlRequest, ReqwestTransport, Transport, TransportSettings};
pub use types::{ApiError, FailureKind, MutationReceipt};
