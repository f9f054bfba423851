use crate::*;

/// Матрица весов одного слоя, построчно:
/// строки = нейроны слоя-приемника, столбцы = нейроны слоя-источника.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Матрица из готовых значений (длина должна быть rows * cols)
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> NetworkResult<Self> {
        if data.len() != rows * cols {
            return Err(NetworkError::DimensionMismatch { expected: rows * cols, actual: data.len() });
        }
        Ok(Self { rows, cols, data })
    }

    /// Матрица со случайными значениями из [-1, 1]
    pub fn random(rng: &mut dyn RngCore, rows: usize, cols: usize) -> Self {
        let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> NetworkResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(NetworkError::DimensionMismatch {
                expected: self.rows * self.cols,
                actual: row * self.cols + col,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Веса входных связей одного нейрона
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Тензор (rows, cols) для расчета
    pub fn to_tensor(&self) -> NetworkResult<Tensor> {
        Ok(Tensor::from_slice(&self.data, (self.rows, self.cols), &Device::Cpu)?)
    }
}

/// Умножение матрицы на вектор: результат длиной `matrix.rows()`.
/// Длина вектора обязана совпадать с `matrix.cols()`.
pub fn multiply(matrix: &Matrix, vector: &[f32]) -> NetworkResult<Vec<f32>> {
    if vector.len() != matrix.cols() {
        return Err(NetworkError::DimensionMismatch { expected: matrix.cols(), actual: vector.len() });
    }
    let xs = Tensor::from_slice(vector, (matrix.cols(), 1), &Device::Cpu)?;//(кол.вх.связей, 1)
    let ys = matrix.to_tensor()?.matmul(&xs)?;//(кол.нейр, 1)
    Ok(ys.flatten_all()?.to_vec1::<f32>()?)
}

pub fn relu(x: f32) -> f32 {
    if x >= 0.0 { x } else { 0.0 }
}

pub fn relu_in_place(values: &mut [f32]) {
    values.iter_mut().for_each(|v| *v = relu(*v));
}
