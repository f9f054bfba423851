use crate::*;

/// Датчик: переводит состояние игры во входной вектор сети.
/// Длина вектора должна совпадать с количеством входов сети
pub trait Sensor {
    fn input_vector(&self) -> Vec<f32>;
}

impl<F> Sensor for F
where
    F: Fn() -> Vec<f32>,
{
    fn input_vector(&self) -> Vec<f32> {
        self()
    }
}

impl Network {
    /// Расчет по показаниям датчика
    pub fn react(&mut self, sensor: &dyn Sensor) -> NetworkResult<&[f32]> {
        let inputs = sensor.input_vector();
        self.propagate(&inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Мяч глазами правой ракетки: смещение по x и y, скорость по x и y
    struct BallSensor {
        ball: (f32, f32),
        velocity: (f32, f32),
        paddle: (f32, f32),
    }

    impl Sensor for BallSensor {
        fn input_vector(&self) -> Vec<f32> {
            vec![
                self.paddle.0 - self.ball.0,
                self.paddle.1 - self.ball.1,
                self.velocity.0,
                self.velocity.1,
            ]
        }
    }

    fn network() -> Network {
        //выход 0 = сумма положительных входов
        let topology = NetworkTopology::new(4, 1, 1, 4).unwrap();
        let mut parameters = vec![0.0; 4 + 4 + 1];
        for row in 0..4 {
            for col in 0..4 {
                parameters.push(if row == col { 1.0 } else { 0.0 });
            }
        }
        parameters.extend([1.0; 4]);
        Network::from_parameters(topology, parameters).unwrap()
    }

    #[test]
    fn react_to_struct_sensor() {
        let sensor = BallSensor { ball: (100.0, 50.0), velocity: (-3.0, 2.0), paddle: (400.0, 40.0) };
        let mut net = network();
        let out = net.react(&sensor).unwrap();
        assert_relative_eq!(out[0], 300.0 + 2.0);
    }

    #[test]
    fn react_to_closure_sensor() {
        let mut net = network();
        let sensor = || vec![1.0f32, -1.0, 0.5, 0.0];
        let out = net.react(&sensor).unwrap().to_vec();
        assert_relative_eq!(out.as_slice(), [1.5f32].as_slice());
    }

    #[test]
    fn sensor_width_must_match() {
        let mut net = network();
        let sensor = || vec![1.0f32, 2.0];
        assert!(matches!(
            net.react(&sensor),
            Err(NetworkError::DimensionMismatch { expected: 4, actual: 2 })
        ));
    }
}
