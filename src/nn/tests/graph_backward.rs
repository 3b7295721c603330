use crate::nn::{GraphError, GraphInner};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_backward_requires_scalar_output() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 3], false, None).unwrap();
    let transpose = graph.new_transpose_node(var, None).unwrap();
    graph
        .set_node_value(var, Some(&Tensor::ones(&[2, 3])))
        .unwrap();
    graph.forward(transpose).unwrap();

    let result = graph.backward(transpose);
    assert_eq!(
        result,
        Err(GraphError::InvalidOperation(
            "反向传播要求输出为标量，但得到形状 [3, 2]".to_string()
        ))
    );
}

#[test]
fn test_backward_requires_forward_first() {
    let mut graph = GraphInner::new();

    let a = graph.new_variable_node(&[1, 2], false, None).unwrap();
    let b = graph.new_variable_node(&[2, 1], false, None).unwrap();
    let out = graph.new_mat_mul_node(a, b, None).unwrap();

    // 没有执行 forward 时反向传播应失败
    assert!(matches!(
        graph.backward(out),
        Err(GraphError::ComputationError(_))
    ));
}

#[test]
fn test_backward_mat_mul() {
    let mut graph = GraphInner::new();

    // out = a·b，a: [1, 2]，b: [2, 1]，out 是标量
    let a = graph.new_variable_node(&[1, 2], false, None).unwrap();
    let b = graph.new_variable_node(&[2, 1], false, None).unwrap();
    let out = graph.new_mat_mul_node(a, b, None).unwrap();

    graph
        .set_node_value(a, Some(&Tensor::new(&[2.0, 3.0], &[1, 2])))
        .unwrap();
    graph
        .set_node_value(b, Some(&Tensor::new(&[4.0, 5.0], &[2, 1])))
        .unwrap();
    graph.forward(out).unwrap();

    let output_scalar = graph.backward(out).unwrap();
    assert_abs_diff_eq!(output_scalar, 23.0);

    // d(out)/da = bᵀ，d(out)/db = aᵀ
    let grad_a = graph.get_node_grad(a).unwrap().unwrap();
    assert_eq!(grad_a, Tensor::new(&[4.0, 5.0], &[1, 2]));
    let grad_b = graph.get_node_grad(b).unwrap().unwrap();
    assert_eq!(grad_b, Tensor::new(&[2.0, 3.0], &[2, 1]));
}

#[test]
fn test_backward_add_accumulates_duplicate_parent() {
    let mut graph = GraphInner::new();

    // out = x + x，梯度应累积为 2
    let x = graph.new_variable_node(&[1, 1], false, None).unwrap();
    let out = graph.new_add_node(&[x, x], None).unwrap();

    graph
        .set_node_value(x, Some(&Tensor::new(&[3.0], &[1, 1])))
        .unwrap();
    graph.forward(out).unwrap();

    let output_scalar = graph.backward(out).unwrap();
    assert_abs_diff_eq!(output_scalar, 6.0);

    let grad_x = graph.get_node_grad(x).unwrap().unwrap();
    assert_eq!(grad_x, Tensor::new(&[2.0], &[1, 1]));
}

#[test]
fn test_backward_through_reshape_and_transpose() {
    let mut graph = GraphInner::new();

    // out = reshape(x, [6,1])ᵀ · reshape(x, [6,1]) = Σ x²
    // d(out)/dx = 2x（梯度沿两条路径回流到 reshape 节点并累积）
    let x = graph.new_variable_node(&[2, 3], false, None).unwrap();
    let col = graph.new_reshape_node(x, &[6, 1], None).unwrap();
    let row = graph.new_transpose_node(col, None).unwrap();
    let out = graph.new_mat_mul_node(row, col, None).unwrap();

    let x_value = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    graph.set_node_value(x, Some(&x_value)).unwrap();
    graph.forward(out).unwrap();

    let output_scalar = graph.backward(out).unwrap();
    assert_abs_diff_eq!(output_scalar, 91.0); // 1+4+9+16+25+36

    let grad_x = graph.get_node_grad(x).unwrap().unwrap();
    assert_eq!(grad_x.shape(), &[2, 3]);
    assert_eq!(
        grad_x,
        Tensor::new(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0], &[2, 3])
    );
}

#[test]
fn test_backward_clears_previous_grads() {
    let mut graph = GraphInner::new();

    let a = graph.new_variable_node(&[1, 2], false, None).unwrap();
    let b = graph.new_variable_node(&[2, 1], false, None).unwrap();
    let out = graph.new_mat_mul_node(a, b, None).unwrap();

    graph
        .set_node_value(a, Some(&Tensor::new(&[2.0, 3.0], &[1, 2])))
        .unwrap();
    graph
        .set_node_value(b, Some(&Tensor::new(&[4.0, 5.0], &[2, 1])))
        .unwrap();
    graph.forward(out).unwrap();

    // 连续两次 backward，梯度不应翻倍（每次都先清零）
    graph.backward(out).unwrap();
    graph.forward(out).unwrap();
    graph.backward(out).unwrap();

    let grad_a = graph.get_node_grad(a).unwrap().unwrap();
    assert_eq!(grad_a, Tensor::new(&[4.0, 5.0], &[1, 2]));
}
