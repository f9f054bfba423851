use crate::*;

impl Network {
    /// Скрещивание двух родителей одной топологии.
    /// Каждое смещение и каждый вес берется у случайного родителя,
    /// затем с вероятностью `mutation_rate` сдвигается на случайную величину из [-1, 1]
    pub fn breed(
        rng: &mut dyn RngCore,
        parent1: &Network,
        parent2: &Network,
        mutation_rate: f32,
    ) -> NetworkResult<Network> {
        check_mutation_rate(mutation_rate)?;
        if parent1.topology() != parent2.topology() {
            return Err(NetworkError::TopologyMismatch {
                expected: parent1.topology(),
                actual: parent2.topology(),
            });
        }
        let genes = parent1
            .parameters()
            .zip(parent2.parameters())
            .map(|(x, y)| {
                let gene = choose(rng, x, y);
                mutate(rng, gene, mutation_rate)
            });
        let child = Network::from_parameters(parent1.topology(), genes)?;
        debug!(topology = %child.topology(), mutation_rate, "Child network bred");
        Ok(child)
    }
}

/// Вероятность мутации должна лежать в [0, 1]
pub fn check_mutation_rate(mutation_rate: f32) -> NetworkResult<()> {
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(NetworkError::config(format!(
            "mutation rate must be within [0, 1], got {mutation_rate}"
        )));
    }
    Ok(())
}

/// Выбор значения одного из родителей, 50 на 50
pub fn choose(rng: &mut dyn RngCore, x: f32, y: f32) -> f32 {
    if rng.gen_bool(0.5) { x } else { y }
}

/// Мутация: с вероятностью `mutation_rate` добавляем случайную величину из [-1, 1]
pub fn mutate(rng: &mut dyn RngCore, x: f32, mutation_rate: f32) -> f32 {
    if rng.gen::<f32>() < mutation_rate {
        x + rng.gen_range(-1.0f32..=1.0)
    } else {
        x
    }
}
