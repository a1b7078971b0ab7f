use std::marker::PhantomData;
use std::sync::Arc;

use portal_core::MutationCommand;
use portal_logging::{portal_info, portal_warn};
use serde_json::Value;

use crate::{ApiError, MutationReceipt, Resource, Transport};

/// Mutation command dispatcher: runs create / update / delete against the
/// API. It does not debounce; callers keep one command in flight.
pub struct MutationDispatcher<R: Resource> {
    transport: Arc<dyn Transport>,
    _resource: PhantomData<R>,
}

impl<R: Resource> MutationDispatcher<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub async fn execute(
        &self,
        command: &MutationCommand<R::Item>,
    ) -> Result<MutationReceipt, ApiError> {
        let kind = command.kind();
        let request = R::mutation_request(command);
        portal_info!("Running {} on {}", request.operation_name, R::NAME);

        match self.transport.execute(&request).await {
            Ok(data) => Ok(MutationReceipt {
                kind,
                id: echoed_id(&data),
            }),
            Err(err) => {
                portal_warn!("{} on {} failed: {}", kind, R::NAME, err);
                Err(err)
            }
        }
    }
}

/// `data` holds a single root field whose selection is `{ id }`.
fn echoed_id(data: &Value) -> Option<String> {
    data.as_object()?
        .values()
        .next()?
        .get("id")?
        .as_str()
        .map(str::to_owned)
}
