use crate::nn::{GraphError, GraphInner};
use crate::tensor::Tensor;

#[test]
fn test_new_node_reshape() {
    let mut graph = GraphInner::new();

    let var = graph
        .new_variable_node(&[2, 3], false, Some("var1"))
        .unwrap();
    let reshape = graph
        .new_reshape_node(var, &[3, 2], Some("reshape"))
        .unwrap();
    // 验证基本属性
    assert_eq!(graph.get_node_parents(reshape).unwrap(), vec![var]);
    assert_eq!(graph.get_node_children(var).unwrap(), vec![reshape]);
    assert_eq!(graph.get_node_name(reshape).unwrap(), "reshape");
    // 形状在定义时即已推断
    assert_eq!(
        graph.get_node_value_expected_shape(reshape).unwrap(),
        &[3, 2]
    );
}

#[test]
fn test_new_node_reshape_with_inferred_dim() {
    let mut graph = GraphInner::new();

    // 480 个元素，(-1, 4) 应推断出 (120, 4)
    let var = graph
        .new_variable_node(&[5, 8, 3, 4], false, None)
        .unwrap();
    let reshape1 = graph.new_reshape_node(var, &[-1, 4], None).unwrap();
    assert_eq!(
        graph.get_node_value_expected_shape(reshape1).unwrap(),
        &[120, 4]
    );

    // 再 reshape 到 (15, -1)，应推断出 (15, 32)
    let reshape2 = graph.new_reshape_node(reshape1, &[15, -1], None).unwrap();
    assert_eq!(
        graph.get_node_value_expected_shape(reshape2).unwrap(),
        &[15, 32]
    );
}

#[test]
fn test_new_node_reshape_with_incompatible_element_count() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[15, 15], false, None).unwrap();
    // 5 * 44 = 220 ≠ 225，定义时就要报错
    let result = graph.new_reshape_node(var, &[5, 44], None);
    assert_eq!(
        result,
        Err(GraphError::ShapeMismatch {
            expected: vec![15, 15],
            got: vec![5, 44],
            message: "Reshape 目标形状 [5, 44]（220个元素）与输入形状 [15, 15]（225个元素）的元素总数不匹配"
                .to_string(),
        })
    );
}

#[test]
fn test_new_node_reshape_with_multiple_inferred_dims() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[4, 6], false, None).unwrap();
    let result = graph.new_reshape_node(var, &[-1, -1], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_new_node_reshape_with_zero_dim() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[4, 6], false, None).unwrap();
    let result = graph.new_reshape_node(var, &[0, 24], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_new_node_reshape_with_indivisible_inferred_dim() {
    let mut graph = GraphInner::new();

    // 24 个元素不能被 7 整除
    let var = graph.new_variable_node(&[4, 6], false, None).unwrap();
    let result = graph.new_reshape_node(var, &[7, -1], None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_new_node_reshape_with_empty_target_shape() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[4, 6], false, None).unwrap();
    let result = graph.new_reshape_node(var, &[], None);
    assert_eq!(
        result,
        Err(GraphError::InvalidOperation(
            "Reshape 目标形状不能为空".to_string()
        ))
    );
}

#[test]
fn test_node_reshape_forward() {
    let mut graph = GraphInner::new();

    let var = graph.new_variable_node(&[2, 3], false, None).unwrap();
    let reshape = graph.new_reshape_node(var, &[3, 2], None).unwrap();

    let value = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    graph.set_node_value(var, Some(&value)).unwrap();
    graph.forward(reshape).unwrap();

    let result = graph.get_node_value(reshape).unwrap().unwrap();
    assert_eq!(result.shape(), &[3, 2]);
    // 行优先顺序下元素保持不变
    assert_eq!(result.to_vec(), value.to_vec());
}
