use crate::*;

// //пример: 2 входа, 1 скрытый слой из 2 нейронов, 1 выход
// biases:  [0.0, 0.0] [0.5, -0.25] [0.125]
// weights: [[1.0, 0.5], [-1.0, 2.0]]  [[2.0, -3.0]]
// вход [1.0, -1.0] -> скрытый [1.0, 0.0] -> выход [2.125]
#[derive(Clone, Debug)]
pub struct Network {
    /// Топология сети (неизменна после создания)
    topology: NetworkTopology,
    /// -Список смещений нейронов по слоям, включая входной слой
    ///  (у входного слоя смещения = 0.0 и в расчете не участвуют)
    biases: Vec<Vec<f32>>,
    /// -Список матриц весов, по одной на каждый слой кроме входного.
    ///  weights[L-1] связывает слой L-1 (столбцы) со слоем L (строки)
    weights: Vec<Matrix>,
    /// -Выходы нейронов по слоям после последнего расчета.
    ///  В сравнение и сохранение не входят
    activations: Vec<Vec<f32>>,
}

impl Network {
    /// Расчет в прямом направлении.
    /// Буферы активаций перезаписываются при каждом вызове
    pub fn propagate(&mut self, inputs: &[f32]) -> NetworkResult<&[f32]> {
        if inputs.len() != self.topology.inputs {
            return Err(NetworkError::DimensionMismatch {
                expected: self.topology.inputs,
                actual: inputs.len(),
            });
        }
        //входной слой - просто копия входов
        self.activations[0].copy_from_slice(inputs);
        for layer in 1..self.topology.layer_count() {
            let mut values = multiply(&self.weights[layer - 1], &self.activations[layer - 1])?;
            values.iter_mut()
                .zip(&self.biases[layer])
                .for_each(|(v, b)| *v += b);
            relu_in_place(&mut values);
            self.activations[layer] = values;
        }
        Ok(self.outputs())
    }
    /// Последовательность всех смещений (послойно), затем всех весов
    /// (послойно, по строкам). Общий порядок для сохранения, скрещивания и сравнения
    pub fn parameters(&self) -> impl Iterator<Item = f32> + '_ {
        self.biases
            .iter()
            .flat_map(|layer| layer.iter().copied())
            .chain(self.weights.iter().flat_map(|m| m.as_slice().iter().copied()))
    }
    /// Сумма всех смещений и весов
    pub fn checksum(&self) -> f32 {
        self.parameters().sum()
    }
    /// Контрольная сумма, усеченная до целого: зерно для имени файла
    pub fn id_seed(&self) -> u64 {
        self.checksum() as i64 as u64
    }
}

impl Network {
    /// Создание сети со случайными весами и смещениями из [-1, 1]
    pub fn random(rng: &mut dyn RngCore, topology: NetworkTopology) -> NetworkResult<Self> {
        topology.validate()?;
        let weights = (0..topology.layer_count() - 1)
            .map(|index| {
                let (rows, cols) = topology.weight_shape(index);
                Matrix::random(rng, rows, cols)
            })
            .collect();
        let biases = topology
            .layer_widths()
            .enumerate()
            .map(|(layer, width)| {
                if layer == 0 {
                    vec![0.0f32; width]// Смещение входного слоя
                } else {
                    (0..width).map(|_| rng.gen_range(-1.0..=1.0)).collect()
                }
            })
            .collect();
        debug!(%topology, "Random network created");
        Ok(Self {
            topology,
            biases,
            weights,
            activations: Self::empty_activations(&topology),
        })
    }
    /// Создание сети из последовательности параметров в порядке `parameters()`
    pub fn from_parameters(
        topology: NetworkTopology,
        parameters: impl IntoIterator<Item = f32>,
    ) -> NetworkResult<Self> {
        topology.validate()?;
        let expected = topology.parameter_count()?;
        let mut parameters = parameters.into_iter();
        let mut taken = 0usize;
        let mut next_chunk = |len: usize| -> NetworkResult<Vec<f32>> {
            let chunk: Vec<f32> = parameters.by_ref().take(len).collect();
            taken += chunk.len();
            if chunk.len() < len {
                return Err(NetworkError::DimensionMismatch { expected, actual: taken });
            }
            Ok(chunk)
        };

        let biases = topology
            .layer_widths()
            .map(&mut next_chunk)
            .collect::<NetworkResult<Vec<_>>>()?;
        let weights = (0..topology.layer_count() - 1)
            .map(|index| {
                let (rows, cols) = topology.weight_shape(index);
                Matrix::from_vec(rows, cols, next_chunk(rows * cols)?)
            })
            .collect::<NetworkResult<Vec<_>>>()?;

        let extra = parameters.count();
        if extra > 0 {
            return Err(NetworkError::DimensionMismatch { expected, actual: expected + extra });
        }
        Ok(Self {
            topology,
            biases,
            weights,
            activations: Self::empty_activations(&topology),
        })
    }
    /// Точная копия параметров другой сети. Топология обязана совпадать
    pub fn copy_with_topology(other: &Network, topology: NetworkTopology) -> NetworkResult<Self> {
        topology.validate()?;
        if other.topology != topology {
            return Err(NetworkError::TopologyMismatch { expected: topology, actual: other.topology });
        }
        Ok(Self {
            topology,
            biases: other.biases.clone(),
            weights: other.weights.clone(),
            activations: Self::empty_activations(&topology),
        })
    }
    /// Нулевые буферы активаций
    fn empty_activations(topology: &NetworkTopology) -> Vec<Vec<f32>> {
        topology.layer_widths().map(|width| vec![0.0; width]).collect()
    }
}

impl Network {
    pub fn topology(&self) -> NetworkTopology {
        self.topology
    }

    pub fn biases(&self) -> &[Vec<f32>] {
        &self.biases
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn activations(&self) -> &[Vec<f32>] {
        &self.activations
    }

    pub fn inputs(&self) -> &[f32] {
        &self.activations[0]
    }
    /// Выходы после последнего расчета
    pub fn outputs(&self) -> &[f32] {
        &self.activations[self.activations.len() - 1]
    }
    /// Активации: по строке на слой
    pub fn activations_report(&self) -> String {
        Self::layers_report(&self.activations)
    }
    /// Смещения: по строке на слой
    pub fn biases_report(&self) -> String {
        Self::layers_report(&self.biases)
    }
    /// Веса: по строке на нейрон, матрицы разделены пустой строкой
    pub fn weights_report(&self) -> String {
        self.weights
            .iter()
            .map(|m| (0..m.rows()).map(|r| m.row(r).iter().join(" ")).join("\n"))
            .join("\n\n")
    }

    fn layers_report(layers: &[Vec<f32>]) -> String {
        layers.iter().map(|layer| layer.iter().join(" ")).join("\n")
    }
}

/// Сравнение только смещений и весов, активации не учитываются
impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.topology == other.topology && self.parameters().eq(other.parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand_chacha::ChaCha8Rng;

    fn tiny() -> Network {
        let topology = NetworkTopology::new(2, 1, 1, 2).unwrap();
        let parameters = vec![
            0.0, 0.0, //входной слой
            0.5, -0.25, //скрытый слой
            0.125, //выход
            1.0, 0.5, -1.0, 2.0, //веса 2x2
            2.0, -3.0, //веса 1x2
        ];
        Network::from_parameters(topology, parameters).unwrap()
    }

    #[test]
    fn random_shapes() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        for topology in [
            NetworkTopology::new(4, 3, 1, 5).unwrap(),
            NetworkTopology::new(1, 1, 3, 2).unwrap(),
            NetworkTopology::new(7, 2, 2, 9).unwrap(),
        ] {
            let net = Network::random(&mut rng, topology).unwrap();
            let widths: Vec<usize> = topology.layer_widths().collect();
            assert_eq!(net.biases().iter().map(Vec::len).collect::<Vec<_>>(), widths);
            assert_eq!(net.activations().iter().map(Vec::len).collect::<Vec<_>>(), widths);
            assert_eq!(net.weights().len(), topology.layer_count() - 1);
            for (index, m) in net.weights().iter().enumerate() {
                assert_eq!((m.rows(), m.cols()), topology.weight_shape(index));
            }
            assert!(net.biases()[0].iter().all(|b| *b == 0.0));
            assert!(net.parameters().all(|p| (-1.0..=1.0).contains(&p)));
            assert_eq!(net.parameters().count(), topology.parameter_count().unwrap());
        }
    }

    #[test]
    fn random_rejects_no_hidden_layers() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let topology = NetworkTopology { inputs: 2, outputs: 1, hidden_layers: 0, hidden_layer_size: 3 };
        assert!(matches!(Network::random(&mut rng, topology), Err(NetworkError::Config(_))));
    }

    #[test]
    fn propagate() {
        let mut net = tiny();
        let actual = net.propagate(&[1.0, -1.0]).unwrap().to_vec();
        assert_relative_eq!(actual.as_slice(), [2.125f32].as_slice());
        assert_relative_eq!(net.activations()[1].as_slice(), [1.0f32, 0.0].as_slice());
        assert_eq!(net.inputs(), &[1.0, -1.0]);

        //второй расчет перезаписывает активации
        let actual = net.propagate(&[0.0, 0.0]).unwrap().to_vec();
        assert_relative_eq!(actual.as_slice(), [1.125f32].as_slice());
        assert_relative_eq!(net.activations()[1].as_slice(), [0.5f32, 0.0].as_slice());
    }

    #[test]
    fn propagate_rejects_wrong_input_length() {
        let mut net = tiny();
        assert!(matches!(
            net.propagate(&[1.0, 2.0, 3.0]),
            Err(NetworkError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn propagate_deep() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let mut net = Network::random(&mut rng, NetworkTopology::new(4, 3, 3, 6).unwrap()).unwrap();
        let out = net.propagate(&[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn from_parameters_checks_length() {
        let topology = NetworkTopology::new(2, 1, 1, 2).unwrap();
        assert!(matches!(
            Network::from_parameters(topology, vec![0.0; 10]),
            Err(NetworkError::DimensionMismatch { expected: 11, actual: 10 })
        ));
        assert!(matches!(
            Network::from_parameters(topology, vec![0.0; 13]),
            Err(NetworkError::DimensionMismatch { expected: 11, actual: 13 })
        ));
        let net = tiny();
        assert_eq!(net.parameters().collect::<Vec<_>>().len(), 11);
    }

    #[test]
    fn equality() {
        let a = tiny();
        let b = tiny();
        assert!(a == a);
        assert!(a == b && b == a);

        let mut c = tiny();
        c.weights[1].set(0, 1, -2.5).unwrap();
        assert!(a != c && c != a);

        let mut d = tiny();
        d.biases[2][0] = 0.0;
        assert!(a != d);

        //активации не сравниваются
        let mut e = tiny();
        e.propagate(&[3.0, 4.0]).unwrap();
        assert!(a == e);
    }

    #[test]
    fn equality_other_topology() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let a = Network::random(&mut rng, NetworkTopology::new(2, 1, 1, 2).unwrap()).unwrap();
        let b = Network::random(&mut rng, NetworkTopology::new(2, 1, 2, 2).unwrap()).unwrap();
        assert!(a != b);
    }

    #[test]
    fn copy_with_topology() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let topology = NetworkTopology::default();
        let original = Network::random(&mut rng, topology).unwrap();
        let copy = Network::copy_with_topology(&original, NetworkTopology::new(4, 3, 1, 5).unwrap()).unwrap();
        assert!(copy == original);
        assert!(copy.activations().iter().flatten().all(|a| *a == 0.0));

        let other = NetworkTopology::new(4, 3, 2, 5).unwrap();
        assert!(matches!(
            Network::copy_with_topology(&original, other),
            Err(NetworkError::TopologyMismatch { .. })
        ));
    }

    #[test]
    fn checksum() {
        let net = tiny();
        assert_relative_eq!(net.checksum(), 1.875);
        assert_eq!(net.id_seed(), 1);
    }

    #[test]
    fn reports() {
        let mut net = tiny();
        net.propagate(&[1.0, -1.0]).unwrap();
        let before = net.clone();
        assert_eq!(net.biases_report(), "0 0\n0.5 -0.25\n0.125");
        assert_eq!(net.weights_report(), "1 0.5\n-1 2\n\n2 -3");
        assert_eq!(net.activations_report(), "1 -1\n1 0\n2.125");
        assert!(net == before);
        assert_eq!(net.activations(), before.activations());
    }
}
