/// Result channel of one host action call
///
/// The host bridge hands one of these to every action and expects exactly
/// one of `success` or `error` to be called, possibly later and from another
/// thread when the action waits for a permission dialog.
pub trait CallbackContext: Send {
    fn success(self: Box<Self>, message: String);
    fn error(self: Box<Self>, message: String);
}

/// Callback backed by a closure receiving `Ok(payload)` or `Err(message)`
pub struct FnCallback<F>(F)
where
    F: FnOnce(Result<String, String>) + Send;

impl<F> FnCallback<F>
where
    F: FnOnce(Result<String, String>) + Send + 'static,
{
    pub fn boxed(f: F) -> Box<dyn CallbackContext> {
        Box::new(FnCallback(f))
    }
}

impl<F> CallbackContext for FnCallback<F>
where
    F: FnOnce(Result<String, String>) + Send,
{
    fn success(self: Box<Self>, message: String) {
        (self.0)(Ok(message))
    }

    fn error(self: Box<Self>, message: String) {
        (self.0)(Err(message))
    }
}
