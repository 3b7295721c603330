use crate::tensor::Tensor;

#[test]
fn test_new_with_shape() {
    let t = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.dimension(), 2);
    assert_eq!(t.size(), 6);
    assert_eq!(t[[0, 0]], 1.0);
    assert_eq!(t[[1, 2]], 6.0);
}

#[test]
fn test_new_scalar() {
    let t = Tensor::new(&[3.5], &[]);
    assert!(t.is_scalar());
    assert_eq!(t.number(), Some(3.5));
    // 形状为[1,1]的也视作标量
    let t = Tensor::new(&[2.5], &[1, 1]);
    assert!(t.is_scalar());
    assert_eq!(t.number(), Some(2.5));
}

#[test]
fn test_zeros_and_ones() {
    let zeros = Tensor::zeros(&[2, 2]);
    assert!(zeros.to_vec().iter().all(|&x| x == 0.0));
    let ones = Tensor::ones(&[5, 8, 3, 4]);
    assert_eq!(ones.size(), 480);
    assert!(ones.to_vec().iter().all(|&x| x == 1.0));
}

#[test]
fn test_eyes() {
    let eye = Tensor::eyes(3);
    assert_eq!(eye.shape(), &[3, 3]);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(eye[[i, j]], if i == j { 1.0 } else { 0.0 });
        }
    }
}

#[test]
fn test_normal_shape_and_spread() {
    let t = Tensor::normal(0.0, 1.0, &[100, 10]);
    assert_eq!(t.shape(), &[100, 10]);
    // 正态分布不应该退化成常数
    let data = t.to_vec();
    let mean = data.iter().sum::<f32>() / data.len() as f32;
    assert!(mean.abs() < 0.5);
}
