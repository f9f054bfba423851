//! Полносвязная нейросеть соперника для Pong: хранение параметров,
//! прямой расчет, скрещивание двух родителей и текстовые сохранения.

pub use self::breeding::*;
pub use self::config::*;
pub use self::error::*;
pub use self::layer_topology::*;
pub use self::matrix::*;
pub use self::network::*;
pub use self::persistence::*;
pub use self::sensor::*;

use std::path::{Path, PathBuf};
use candle_core::{Device, Tensor};
use itertools::Itertools;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

mod breeding;
mod config;
mod error;
mod layer_topology;
mod matrix;
mod network;
mod persistence;
mod sensor;
