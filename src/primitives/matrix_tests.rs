pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let row = m.row(1);
    assert_eq!(row.len(), 3);
    assert!((row[0] - 4.0).abs() < 1e-12);
    assert!((row[1] - 5.0).abs() < 1e-12);
    assert!((row[2] - 6.0).abs() < 1e-12);
}

#[test]
fn test_row_slice() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn test_column() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let col = m.column(1);
    assert_eq!(col.len(), 2);
    assert!((col[0] - 2.0).abs() < 1e-12);
    assert!((col[1] - 5.0).abs() < 1e-12);
}

#[test]
fn test_set() {
    let mut m = Matrix::zeros(2, 2);
    m.set(0, 1, 5.0);
    assert!((m.get(0, 1) - 5.0).abs() < 1e-12);
}

#[test]
fn test_normalized_rows() {
    let m = Matrix::from_vec(2, 4, vec![1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 6.0])
        .expect("test data has correct dimensions: 2*4=8 elements");
    let norm = m.normalized_rows();

    for col in 0..4 {
        assert!((norm.get(0, col) - 0.25).abs() < 1e-12);
    }
    assert!((norm.get(1, 0) - 0.25).abs() < 1e-12);
    assert!((norm.get(1, 3) - 0.75).abs() < 1e-12);

    let row_sum: f64 = norm.row_slice(1).iter().sum();
    assert!((row_sum - 1.0).abs() < 1e-12);
}

#[test]
fn test_normalized_rows_zero_row_untouched() {
    let m = Matrix::from_vec(2, 3, vec![0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let norm = m.normalized_rows();
    assert_eq!(norm.row_slice(0), &[0.0, 0.0, 0.0]);
    assert!((norm.get(1, 1) - 0.5).abs() < 1e-12);
}
