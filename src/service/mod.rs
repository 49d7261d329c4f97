pub mod dispatcher;
pub mod pipeline;
pub mod replies;
pub mod traits;
