use std::fmt;
use crate::*;

/// Топология сети: входы, выходы, скрытые слои одинаковой ширины.
/// Скрытый слой нужен хотя бы один.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkTopology {
    /// Количество входов (ширина слоя 0)
    pub inputs: usize,
    /// Количество выходов (ширина последнего слоя)
    pub outputs: usize,
    /// Количество скрытых слоев, без входного и выходного
    pub hidden_layers: usize,
    /// Количество нейронов в каждом скрытом слое
    pub hidden_layer_size: usize,
}

impl NetworkTopology {
    /// Конструктор с проверкой
    pub fn new(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        hidden_layer_size: usize,
    ) -> NetworkResult<Self> {
        let topology = Self { inputs, outputs, hidden_layers, hidden_layer_size };
        topology.validate()?;
        Ok(topology)
    }

    pub fn validate(&self) -> NetworkResult<()> {
        if self.hidden_layers == 0 {
            return Err(NetworkError::config("at least one hidden layer is required"));
        }
        if self.inputs == 0 || self.outputs == 0 || self.hidden_layer_size == 0 {
            return Err(NetworkError::config(format!("zero-width layer in topology {self}")));
        }
        if self.hidden_layers.checked_add(2).is_none() {
            return Err(NetworkError::config("layer count overflows"));
        }
        self.parameter_count().map(|_| ())
    }

    /// Количество слоев вместе с входным и выходным
    pub fn layer_count(&self) -> usize {
        self.hidden_layers + 2
    }

    /// Ширина слоя `layer`
    pub fn layer_width(&self, layer: usize) -> usize {
        if layer == 0 {
            self.inputs
        } else if layer == self.layer_count() - 1 {
            self.outputs
        } else {
            self.hidden_layer_size
        }
    }

    /// Размер матрицы весов `index` (строки = слой index+1, столбцы = слой index)
    pub fn weight_shape(&self, index: usize) -> (usize, usize) {
        (self.layer_width(index + 1), self.layer_width(index))
    }

    /// Ширины всех слоев по порядку
    pub fn layer_widths(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.layer_count()).map(|l| self.layer_width(l))
    }

    pub fn bias_count(&self) -> NetworkResult<usize> {
        self.hidden_layers
            .checked_mul(self.hidden_layer_size)
            .and_then(|n| n.checked_add(self.inputs))
            .and_then(|n| n.checked_add(self.outputs))
            .ok_or_else(|| NetworkError::config("bias count overflows"))
    }

    pub fn weight_count(&self) -> NetworkResult<usize> {
        let h = self.hidden_layer_size;
        let first = h.checked_mul(self.inputs);
        let middle = h.checked_mul(h)
            .and_then(|n| n.checked_mul(self.hidden_layers.saturating_sub(1)));
        let last = self.outputs.checked_mul(h);
        first.zip(middle).zip(last)
            .and_then(|((a, b), c)| a.checked_add(b)?.checked_add(c))
            .ok_or_else(|| NetworkError::config("weight count overflows"))
    }

    /// Всего смещений и весов
    pub fn parameter_count(&self) -> NetworkResult<usize> {
        self.bias_count()?
            .checked_add(self.weight_count()?)
            .ok_or_else(|| NetworkError::config("parameter count overflows"))
    }
}

impl Default for NetworkTopology {
    /// Соперник в Pong: 4 входа, 3 выхода, 1 скрытый слой из 5 нейронов
    fn default() -> Self {
        Self { inputs: 4, outputs: 3, hidden_layers: 1, hidden_layer_size: 5 }
    }
}

impl fmt::Display for NetworkTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}_{}",
               self.inputs, self.outputs, self.hidden_layers, self.hidden_layer_size)
    }
}
