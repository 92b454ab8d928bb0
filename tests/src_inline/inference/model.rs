use super::*;

fn tiny_graph() -> ModelGraph {
    // 2x2 input, 3 classes; class 1 responds to the first element
    ModelGraph {
        input_shape: vec![2, 2],
        weights: vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![4.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ],
        bias: vec![0.0, 0.0, 0.0],
    }
}

#[test]
fn test_from_graph_validates_dimensions() {
    let mut g = tiny_graph();
    g.bias.pop();
    assert!(matches!(DenseClassifier::from_graph(g), Err(InferenceError::ModelLoad(_))));

    let mut g = tiny_graph();
    g.weights[2].push(1.0);
    assert!(DenseClassifier::from_graph(g).is_err());

    let mut g = tiny_graph();
    g.input_shape = vec![];
    assert!(DenseClassifier::from_graph(g).is_err());

    let g = ModelGraph {
        input_shape: vec![1],
        weights: vec![],
        bias: vec![],
    };
    assert!(DenseClassifier::from_graph(g).is_err());
}

#[test]
fn test_from_json_str_reports_malformed_graph() {
    let err = DenseClassifier::from_json_str("{\"input_shape\": [2]").unwrap_err();
    assert!(matches!(err, InferenceError::ModelLoad(_)));
}

#[test]
fn test_predict_is_softmax_over_classes() {
    let handle = ModelHandle::new(DenseClassifier::from_graph(tiny_graph()).unwrap());
    let sample = Tensor::new(vec![2, 2], vec![1.0, 0.0, 0.0, 0.0]).unwrap();
    let out = handle.predict(sample).unwrap();
    assert_eq!(out.len(), 3);
    let sum: f32 = out.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    assert!(out[1] > out[0] && out[1] > out[2]);
}

#[test]
fn test_predict_releases_buffers_on_both_paths() {
    let handle = ModelHandle::new(DenseClassifier::from_graph(tiny_graph()).unwrap());
    let ok = Tensor::new(vec![2, 2], vec![0.5; 4]).unwrap();
    assert!(handle.predict(ok).is_ok());
    assert_eq!(handle.ledger().live(), 0);

    let bad = Tensor::new(vec![4], vec![0.5; 4]).unwrap();
    assert!(handle.predict(bad).is_err());
    assert_eq!(handle.ledger().live(), 0);
}

#[test]
fn test_softmax_handles_large_logits() {
    let mut v = vec![1000.0f32, 1000.0, 0.0];
    softmax_in_place(&mut v);
    assert!((v[0] - 0.5).abs() < 1e-5);
    assert!((v[1] - 0.5).abs() < 1e-5);
    assert!(v[2] < 1e-6);
}

#[test]
fn test_from_graph_rejects_overflowing_input_shape() {
    let g = ModelGraph {
        input_shape: vec![65536, 65536, 65536, 65536, 4],
        weights: vec![vec![0.0; 4]],
        bias: vec![0.0],
    };
    match DenseClassifier::from_graph(g) {
        Err(InferenceError::ModelLoad(msg)) => assert!(msg.contains("too large")),
        other => panic!("unexpected: {other:?}"),
    }
}
