//! Настройки эволюции соперника.
//!
//! [`EvolutionConfig`] хранится в JSON рядом с сохранениями и задает
//! топологию, вероятность мутации и каталог для лучших сетей.

use std::fs;
use crate::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Топология всех сетей поколения. По умолчанию **4_3_1_5**
    pub topology: NetworkTopology,
    /// Вероятность мутации каждого параметра при скрещивании. По умолчанию **0.1**
    pub mutation_rate: f32,
    /// Каталог сохранений. По умолчанию **saves**
    pub save_dir: PathBuf,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            topology: NetworkTopology::default(),
            mutation_rate: 0.1,
            save_dir: PathBuf::from("saves"),
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> NetworkResult<()> {
        self.topology.validate()?;
        check_mutation_rate(self.mutation_rate)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| NetworkError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(?path, topology = %config.topology, "Evolution config loaded");
        Ok(config)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> NetworkResult<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| NetworkError::io(path, e))
    }
    /// Новая случайная сеть нужной топологии
    pub fn spawn(&self, rng: &mut dyn RngCore) -> NetworkResult<Network> {
        Network::random(rng, self.topology)
    }
    /// Потомок двух родителей с настроенной вероятностью мутации
    pub fn breed(
        &self,
        rng: &mut dyn RngCore,
        parent1: &Network,
        parent2: &Network,
    ) -> NetworkResult<Network> {
        if parent1.topology() != self.topology {
            return Err(NetworkError::TopologyMismatch {
                expected: self.topology,
                actual: parent1.topology(),
            });
        }
        Network::breed(rng, parent1, parent2, self.mutation_rate)
    }
    /// Сохранение сети в каталог настроек (каталог создается при необходимости)
    pub fn checkpoint(&self, network: &Network, fitness: u32) -> NetworkResult<PathBuf> {
        fs::create_dir_all(&self.save_dir).map_err(|e| NetworkError::io(&self.save_dir, e))?;
        network.save(&self.save_dir, fitness)
    }
}
