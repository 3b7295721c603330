use crate::nn::{GraphError, GraphInner};
use crate::tensor::Tensor;

#[test]
fn test_forward_simple_chain() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 3], false, None).unwrap();
    let reshape = graph.new_reshape_node(var, &[3, 2], None).unwrap();
    let transpose = graph.new_transpose_node(reshape, None).unwrap();

    graph
        .set_node_value(var, Some(&Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])))
        .unwrap();
    graph.forward(transpose).unwrap();

    // 中间节点与输出节点都应有值
    assert!(graph.has_node_value(reshape).unwrap());
    let result = graph.get_node_value(transpose).unwrap().unwrap();
    assert_eq!(result.shape(), &[2, 3]);
}

#[test]
fn test_forward_without_variable_value() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 3], false, None).unwrap();
    let reshape = graph.new_reshape_node(var, &[3, 2], None).unwrap();

    // Variable 未设置值时前向传播应失败
    let result = graph.forward(reshape);
    assert!(matches!(result, Err(GraphError::ComputationError(_))));
}

#[test]
fn test_forward_on_variable_node() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 2], false, None).unwrap();
    // 无值的 Variable 节点不能作为前向传播的目标
    assert!(matches!(
        graph.forward(var),
        Err(GraphError::InvalidOperation(_))
    ));

    // 有值后 forward 直接成功（无需计算）
    graph
        .set_node_value(var, Some(&Tensor::ones(&[2, 2])))
        .unwrap();
    assert!(graph.forward(var).is_ok());
}

#[test]
fn test_forward_pass_id_reuse_within_one_pass() {
    let mut graph = GraphInner::new();

    // 菱形结构：var 同时是 add 的两个分支的祖先
    let var = graph.new_variable_node(&[2, 2], false, None).unwrap();
    let t1 = graph.new_transpose_node(var, None).unwrap();
    let t2 = graph.new_transpose_node(t1, None).unwrap();
    let add = graph.new_add_node(&[var, t2], None).unwrap();

    graph
        .set_node_value(var, Some(&Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2])))
        .unwrap();

    assert_eq!(graph.last_forward_pass_id(), 0);
    graph.forward(add).unwrap();
    assert_eq!(graph.last_forward_pass_id(), 1);
    graph.forward(add).unwrap();
    assert_eq!(graph.last_forward_pass_id(), 2);

    let result = graph.get_node_value(add).unwrap().unwrap();
    // 转置两次等于原值，所以结果是 2 倍
    assert_eq!(result, &Tensor::new(&[2.0, 4.0, 6.0, 8.0], &[2, 2]));
}

#[test]
fn test_forward_recomputes_after_value_change() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 2], false, None).unwrap();
    let transpose = graph.new_transpose_node(var, None).unwrap();

    graph
        .set_node_value(var, Some(&Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2])))
        .unwrap();
    graph.forward(transpose).unwrap();
    assert_eq!(
        graph.get_node_value(transpose).unwrap().unwrap(),
        &Tensor::new(&[1.0, 3.0, 2.0, 4.0], &[2, 2])
    );

    // 修改 Variable 的值后再次 forward，应得到新结果
    graph
        .set_node_value(var, Some(&Tensor::new(&[5.0, 6.0, 7.0, 8.0], &[2, 2])))
        .unwrap();
    graph.forward(transpose).unwrap();
    assert_eq!(
        graph.get_node_value(transpose).unwrap().unwrap(),
        &Tensor::new(&[5.0, 7.0, 6.0, 8.0], &[2, 2])
    );
}
