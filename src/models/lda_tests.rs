pub(crate) use super::*;
use crate::params::ParamValue;

fn dtm() -> Matrix<f64> {
    Matrix::from_vec(
        3,
        5,
        vec![
            2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 2.0,
        ],
    )
    .expect("matrix should succeed")
}

fn config(n_topics: i64) -> SampledConfiguration {
    let mut config = SampledConfiguration::new();
    config.push("n_components", ParamValue::Int(n_topics));
    config
}

#[test]
fn test_lda_fit_shapes() {
    let family = LatentDirichletAllocation::new();
    let run = family.fit(&dtm(), &config(2), 42).expect("fit should succeed");

    assert_eq!(run.n_topics(), 2);
    assert_eq!(run.topic_term_weights().shape(), (2, 5));
}

#[test]
fn test_lda_rows_are_distributions() {
    let family = LatentDirichletAllocation::new();
    let run = family.fit(&dtm(), &config(2), 42).expect("fit should succeed");

    let weights = run.topic_term_weights();
    for topic in 0..weights.n_rows() {
        let row_sum: f64 = weights.row_slice(topic).iter().sum();
        assert!((row_sum - 1.0).abs() < 1e-9, "topic {topic} sums to {row_sum}");
        assert!(weights.row_slice(topic).iter().all(|&w| w >= 0.0));
    }
}

#[test]
fn test_lda_same_seed_same_artifact() {
    let family = LatentDirichletAllocation::new();
    let a = family.fit(&dtm(), &config(2), 9).expect("fit should succeed");
    let b = family.fit(&dtm(), &config(2), 9).expect("fit should succeed");
    assert_eq!(a.topic_term_weights(), b.topic_term_weights());
}

#[test]
fn test_lda_different_seed_different_artifact() {
    let family = LatentDirichletAllocation::new();
    let a = family.fit(&dtm(), &config(2), 1).expect("fit should succeed");
    let b = family.fit(&dtm(), &config(2), 2).expect("fit should succeed");
    assert_ne!(a.topic_term_weights(), b.topic_term_weights());
}

#[test]
fn test_lda_config_overrides_defaults() {
    let family = LatentDirichletAllocation::new();
    let mut custom = config(2);
    custom.push("doc_topic_prior", ParamValue::Float(0.9));
    custom.push("max_iter", ParamValue::Int(5));

    let base = family.fit(&dtm(), &config(2), 3).expect("fit should succeed");
    let overridden = family.fit(&dtm(), &custom, 3).expect("fit should succeed");
    assert_ne!(base.topic_term_weights(), overridden.topic_term_weights());
}

#[test]
fn test_lda_empty_matrix_error() {
    let empty = Matrix::from_vec(0, 0, vec![]).expect("empty matrix");
    let family = LatentDirichletAllocation::new();
    let err = family.fit(&empty, &config(2), 0).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_lda_missing_n_components_error() {
    let family = LatentDirichletAllocation::new();
    let err = family
        .fit(&dtm(), &SampledConfiguration::new(), 0)
        .unwrap_err();
    assert!(err.to_string().contains("n_components"));
}

#[test]
fn test_lda_spaces_name_honored_params() {
    let simple = LatentDirichletAllocation::simple_space();
    let names: Vec<&str> = simple.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["n_components"]);

    let complex = LatentDirichletAllocation::complex_space();
    let names: Vec<&str> = complex.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["n_components", "doc_topic_prior", "max_iter"]);
}

#[test]
fn test_lda_fit_once_exposes_document_topics() {
    let family = LatentDirichletAllocation::new();
    let run = family
        .fit_once(&dtm(), &config(2), 42)
        .expect("fit should succeed");

    let doc_topics = run.document_topics();
    assert_eq!(doc_topics.shape(), (3, 2));
    for doc in 0..3 {
        let row_sum: f64 = doc_topics.row_slice(doc).iter().sum();
        assert!((row_sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_lda_builder() {
    let family = LatentDirichletAllocation::new()
        .with_max_iter(10)
        .with_doc_topic_prior(0.5);
    let run = family.fit(&dtm(), &config(3), 11).expect("fit should succeed");
    assert_eq!(run.n_topics(), 3);
}
