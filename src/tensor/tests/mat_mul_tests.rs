use crate::tensor::Tensor;

#[test]
fn test_mat_mul_vector_vector() {
    // 结果为标量的情况
    let a = Tensor::new(&[1.0, 2.0, 3.0], &[1, 3]);
    let b = Tensor::new(&[4.0, 5.0, 6.0], &[3, 1]);
    let result = a.mat_mul(&b);
    let expected = Tensor::new(&[32.0], &[1, 1]);
    assert_eq!(result, expected);
    // 结果为矩阵的情况
    let result = b.mat_mul(&a);
    let expected = Tensor::new(&[4.0, 8.0, 12.0, 5.0, 10.0, 15.0, 6.0, 12.0, 18.0], &[3, 3]);
    assert_eq!(result, expected);
}

#[test]
fn test_mat_mul_matrix_matrix() {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let b = Tensor::new(&[5.0, 6.0, 7.0, 8.0, 9.0, 10.0], &[2, 3]);
    let result = a.mat_mul(&b);
    let expected = Tensor::new(&[21.0, 24.0, 27.0, 47.0, 54.0, 61.0], &[2, 3]);
    assert_eq!(result, expected);
}

#[test]
fn test_mat_mul_with_identity() {
    let a = Tensor::eyes(2);
    let b = Tensor::new(&[2.0, 3.0, 4.0, 5.0, 6.0, 7.0], &[2, 3]);
    let result = a.mat_mul(&b);
    assert_eq!(result, b);
}

#[test]
fn test_mat_mul_ones_with_own_transpose() {
    // 全一矩阵与自身转置相乘：每个元素都等于内维长度
    let a = Tensor::ones(&[15, 32]);
    let result = a.mat_mul(&a.transpose());
    assert_eq!(result.shape(), &[15, 15]);
    assert!(result.to_vec().iter().all(|&x| x == 32.0));
}

#[test]
#[should_panic(
    expected = "形状不一致，故无法矩阵相乘：第一个张量的形状为[2, 2]，第二个张量的形状为[3, 2]"
)]
fn test_mat_mul_with_incompatible_shape() {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let b = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
    let _ = a.mat_mul(&b);
}

#[test]
#[should_panic(expected = "张量的阶数须==2")]
fn test_mat_mul_with_high_rank_tensor() {
    let a = Tensor::ones(&[2, 2, 2]);
    let b = Tensor::ones(&[2, 2]);
    let _ = a.mat_mul(&b);
}
