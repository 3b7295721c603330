mod graph_backward;
mod graph_forward;
mod node_reshape;
