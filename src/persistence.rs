//! Текстовые сохранения сети.
//!
//! Формат (токены через пробел):
//! 1-я строка: `<входы> <выходы> <скрытых слоев> <ширина скрытого слоя>`,
//! 2-я строка: все смещения послойно,
//! 3-я строка: все веса послойно, по строкам матриц.
//!
//! Имя файла: `<входы>_<выходы>_<скрытых слоев>_<ширина>_score<оценка>_<id из 10 символов>`,
//! по нему архитектура восстанавливается без чтения файла.

use std::fmt;
use std::fs;
use std::str::FromStr;
use crate::*;

/// Длина случайного суффикса имени файла
pub const ID_SIZE: usize = 10;

/// Случайный суффикс: каждый символ - буква a..z или цифра 0..9, 50 на 50
pub fn generate_id(rng: &mut dyn RngCore) -> String {
    (0..ID_SIZE)
        .map(|_| {
            if rng.gen_bool(0.5) {
                (b'a' + rng.gen_range(0..26u8)) as char
            } else {
                (b'0' + rng.gen_range(0..10u8)) as char
            }
        })
        .collect()
}

/// Разобранное имя файла сохранения
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveName {
    pub topology: NetworkTopology,
    pub fitness: u32,
    pub id: String,
}

impl SaveName {
    /// Имя из последнего компонента пути
    pub fn from_path(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        path.file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| NetworkError::config(format!("no file name in {path:?}")))?
            .parse()
    }
}

impl fmt::Display for SaveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_score{}_{}", self.topology, self.fitness, self.id)
    }
}

impl FromStr for SaveName {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let bad = || NetworkError::config(format!("not a network save name: {name:?}"));
        let parts: Vec<&str> = name.split('_').collect();
        let [inputs, outputs, hidden_layers, hidden_layer_size, score, id] = parts.as_slice() else {
            return Err(bad());
        };
        let count = |s: &str| s.parse::<usize>().map_err(|_| bad());
        let topology = NetworkTopology::new(
            count(*inputs)?,
            count(*outputs)?,
            count(*hidden_layers)?,
            count(*hidden_layer_size)?,
        )?;
        let fitness = score
            .strip_prefix("score")
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(bad)?;
        if id.len() != ID_SIZE || !id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
            return Err(bad());
        }
        Ok(Self { topology, fitness, id: id.to_string() })
    }
}

impl Network {
    /// Сохранение в `dir` с оценкой `fitness`.
    /// Суффикс имени генерируется из контрольной суммы параметров,
    /// поэтому у одной и той же сети он всегда один и тот же
    pub fn save(&self, dir: impl AsRef<Path>, fitness: u32) -> NetworkResult<PathBuf> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.id_seed());
        self.save_with_rng(dir, fitness, &mut rng)
    }
    /// Сохранение с внешним генератором суффикса
    pub fn save_with_rng(
        &self,
        dir: impl AsRef<Path>,
        fitness: u32,
        rng: &mut dyn RngCore,
    ) -> NetworkResult<PathBuf> {
        let name = SaveName { topology: self.topology(), fitness, id: generate_id(rng) };
        let path = dir.as_ref().join(name.to_string());
        fs::write(&path, self.to_record()).map_err(|e| NetworkError::io(&path, e))?;
        info!(?path, fitness, "Network saved");
        Ok(path)
    }
    /// Загрузка из файла
    pub fn load(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| NetworkError::io(path, e))?;
        let network = Self::from_record(&text)
            .inspect_err(|e| warn!(?path, error = %e, "Malformed network record"))?;
        info!(?path, topology = %network.topology(), "Network loaded");
        Ok(network)
    }
    /// Текст сохранения
    pub fn to_record(&self) -> String {
        let t = self.topology();
        let biases = self.biases().iter().flatten().join(" ");
        let weights = self.weights().iter().flat_map(|m| m.as_slice()).join(" ");
        format!("{} {} {} {}\n{biases}\n{weights}\n",
                t.inputs, t.outputs, t.hidden_layers, t.hidden_layer_size)
    }
    /// Разбор текста сохранения
    pub fn from_record(text: &str) -> NetworkResult<Self> {
        let mut tokens = text.split_whitespace();
        let mut header = [0usize; 4];
        for (position, slot) in header.iter_mut().enumerate() {
            let token = tokens
                .next()
                .ok_or_else(|| NetworkError::parse(position, "unexpected end of header"))?;
            *slot = token
                .parse()
                .map_err(|_| NetworkError::parse(position, format!("expected a count, got {token:?}")))?;
        }
        let [inputs, outputs, hidden_layers, hidden_layer_size] = header;
        let topology = NetworkTopology { inputs, outputs, hidden_layers, hidden_layer_size };
        //размер из заголовка проверяем до выделения памяти
        topology
            .validate()
            .map_err(|e| NetworkError::parse(0, format!("invalid header: {e}")))?;
        let expected = topology.parameter_count()?;

        let values: Vec<&str> = tokens.collect();
        if values.len() != expected {
            return Err(NetworkError::parse(
                header.len() + values.len().min(expected),
                format!("header {topology} needs {expected} values, found {}", values.len()),
            ));
        }
        let parameters = values
            .iter()
            .enumerate()
            .map(|(i, token)| {
                token.parse::<f32>().map_err(|_| {
                    NetworkError::parse(header.len() + i, format!("not a number: {token:?}"))
                })
            })
            .collect::<NetworkResult<Vec<f32>>>()?;
        Self::from_parameters(topology, parameters)
    }
}
