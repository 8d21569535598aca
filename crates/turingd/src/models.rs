//! Simulated prediction models.
//!
//! Stand-ins for real classifier backends: each sleeps for its configured
//! latency, then fails with probability `1 - success_rate`. A successful
//! attempt reports a confidence drawn from [0.5, 1.0) and a random verdict.

use crate::config::ModelConfig;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use turing_common::{Label, Prediction, Provider, ProviderChain, ProviderError};

pub struct SimulatedModel {
    id: String,
    latency: Duration,
    success_rate: f64,
}

impl SimulatedModel {
    pub fn new(id: impl Into<String>, latency: Duration, success_rate: f64) -> Self {
        Self {
            id: id.into(),
            latency,
            success_rate,
        }
    }

    pub fn from_config(cfg: &ModelConfig) -> Self {
        Self::new(
            cfg.name.clone(),
            Duration::from_millis(cfg.latency_ms),
            cfg.success_rate,
        )
    }
}

#[async_trait]
impl Provider for SimulatedModel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn predict(&self) -> Result<Prediction, ProviderError> {
        tokio::time::sleep(self.latency).await;

        let (failed, confidence, human) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen::<f64>() > self.success_rate,
                0.5 + rng.gen::<f64>() * 0.5,
                rng.gen_bool(0.5),
            )
        };

        if failed {
            return Err(ProviderError::new(format!("{} failed", self.id)));
        }

        Ok(Prediction {
            provider: self.id.clone(),
            confidence,
            label: if human { Label::Human } else { Label::Ai },
        })
    }
}

/// Build the provider chain from configuration, preserving file order
pub fn build_chain(models: &[ModelConfig]) -> ProviderChain {
    ProviderChain::new(
        models
            .iter()
            .map(|cfg| Arc::new(SimulatedModel::from_config(cfg)) as Arc<dyn Provider>)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_succeeding_model() {
        let model = SimulatedModel::new("ModelA", Duration::ZERO, 1.0);

        for _ in 0..20 {
            let p = model.predict().await.expect("success_rate 1.0 never fails");
            assert_eq!(p.provider, "ModelA");
            assert!((0.5..=1.0).contains(&p.confidence));
        }
    }

    #[tokio::test]
    async fn test_always_failing_model() {
        let model = SimulatedModel::new("ModelB", Duration::ZERO, 0.0);

        for _ in 0..20 {
            let err = model.predict().await.expect_err("success_rate 0.0 never succeeds");
            assert_eq!(err.to_string(), "ModelB failed");
        }
    }

    #[test]
    fn test_chain_preserves_config_order() {
        let configs = vec![
            ModelConfig {
                name: "ModelA".to_string(),
                latency_ms: 0,
                success_rate: 0.9,
            },
            ModelConfig {
                name: "ModelB".to_string(),
                latency_ms: 0,
                success_rate: 0.7,
            },
        ];

        let chain = build_chain(&configs);
        let ids: Vec<&str> = chain.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["ModelA", "ModelB"]);
    }
}
