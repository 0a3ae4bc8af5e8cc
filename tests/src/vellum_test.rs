use crate::Setup;

/// Drives one async test case on its own current-thread runtime.
///
/// Tests are plain `#[test]` functions so the `tests!` macro can stamp out
/// one copy per driver.
pub struct VellumTest<S: Setup> {
    runtime: tokio::runtime::Runtime,
    setup: Option<S>,
}

impl<S: Setup> VellumTest<S> {
    /// Create a new VellumTest with a current-thread runtime.
    pub fn new(setup: S) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime,
            setup: Some(setup),
        }
    }

    /// Run a test function with the setup, using our managed runtime.
    pub fn run_test<F, Fut>(&mut self, test_fn: F)
    where
        F: FnOnce(S) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let setup = self.setup.take().expect("Setup already consumed");
        self.runtime.block_on(async {
            test_fn(setup).await;
        });
    }
}
