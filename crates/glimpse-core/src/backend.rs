use crate::context::Context;

/// The leveled-logging capability a channel backend must provide.
///
/// One method per severity level; the dispatcher invokes the method that
/// matches the event's severity. Every method receives the message and
/// the context with `file`/`line` already stamped in. Backends decide
/// their own filtering and must never panic back into the dispatcher.
pub trait ChannelLogger: Send + Sync {
    fn emergency(&self, message: &str, context: &Context);
    fn alert(&self, message: &str, context: &Context);
    fn critical(&self, message: &str, context: &Context);
    fn error(&self, message: &str, context: &Context);
    fn warning(&self, message: &str, context: &Context);
    fn notice(&self, message: &str, context: &Context);
    fn info(&self, message: &str, context: &Context);
    fn debug(&self, message: &str, context: &Context);
}
