use std::time::Duration;

use crate::{AnalysisEngine, Generator, NoGenerator};

pub struct AnalysisEngineBuilder<G = NoGenerator> {
    generator: Option<G>,
    timeout: Duration,
}

impl AnalysisEngineBuilder {
    pub fn new() -> Self {
        Self {
            generator: None,
            timeout: AnalysisEngine::<NoGenerator>::DEFAULT_TIMEOUT,
        }
    }
}

impl Default for AnalysisEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> AnalysisEngineBuilder<G> {
    pub fn generator<G2: Generator + Send + Sync + 'static>(
        self,
        generator: G2,
    ) -> AnalysisEngineBuilder<G2> {
        AnalysisEngineBuilder {
            generator: Some(generator),
            timeout: self.timeout,
        }
    }

    /// Like [`generator`](Self::generator), for capabilities that are only sometimes configured.
    pub fn maybe_generator<G2: Generator + Send + Sync + 'static>(
        self,
        generator: Option<G2>,
    ) -> AnalysisEngineBuilder<G2> {
        AnalysisEngineBuilder {
            generator,
            timeout: self.timeout,
        }
    }

    /// Upper bound on a single generator call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<G> AnalysisEngineBuilder<G>
where
    G: Generator + Send + Sync + 'static,
{
    pub fn build(self) -> AnalysisEngine<G> {
        AnalysisEngine {
            generator: self.generator,
            timeout: self.timeout,
        }
    }
}
