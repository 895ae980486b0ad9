//! Ingestion tests: delimited edge lists on disk -> BipartiteNetwork.

use std::io::Write;

use birank::ingest::{read_edge_table, EdgeListConfig};
use birank::matrix::to_dense_rows;
use birank::{BipartiteNetwork, Error, NodeKey, Side};

fn write_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_edgelist_weighted() {
    let file = write_file("top,bottom,weight\nt1,b1,1\nt1,b2,1\nt2,b1,2\nt2,b2,1\nt1,b1,1\n");
    let config = EdgeListConfig::default().with_weight_column("weight");

    let mut net = BipartiteNetwork::new();
    net.load_edgelist(file.path(), &config).unwrap();

    assert_eq!(to_dense_rows(net.adjacency()), vec![vec![2.0, 1.0], vec![2.0, 1.0]]);
    let p = net.project(Side::Top).unwrap();
    assert_eq!(to_dense_rows(&p.matrix), vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
}

#[test]
fn test_load_edgelist_custom_columns_and_delimiter() {
    let file = write_file("user;item;score\n10;apple;0.5\n11;apple;1.5\n10;pear;\n");
    let config = EdgeListConfig::new("user", "item")
        .with_weight_column("score")
        .with_delimiter(b';');

    let mut net = BipartiteNetwork::new();
    net.load_edgelist(file.path(), &config).unwrap();

    assert_eq!(net.top_column(), "user");
    assert_eq!(net.top_index().ids(), &[NodeKey::Int(10), NodeKey::Int(11)]);
    // empty score cell weighs 1.0
    assert_eq!(net.weight(&NodeKey::Int(10), &"pear".into()), 1.0);
    let users = net.project_on("user").unwrap();
    assert_eq!(users.weight(&NodeKey::Int(10), &NodeKey::Int(11)), 0.75);
}

#[test]
fn test_load_missing_file() {
    let mut net = BipartiteNetwork::new();
    let err = net
        .load_edgelist("/definitely/not/here.csv", &EdgeListConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_non_numeric_weight() {
    let data = "top,bottom,weight\na,x,heavy\n";
    let table = read_edge_table(data.as_bytes(), &EdgeListConfig::default()).unwrap();
    let err = BipartiteNetwork::from_table(&table, "top", "bottom", Some("weight")).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_headerless_positions() {
    let data = "a,x\nb,x\n";
    let config = EdgeListConfig::new("0", "1").with_headers(false);
    let table = read_edge_table(data.as_bytes(), &config).unwrap();
    let net = BipartiteNetwork::from_table(&table, "0", "1", None).unwrap();
    let (_, items) = net.degrees().unwrap();
    assert_eq!(items.get(&"x".into()), Some(2));
}

#[test]
fn test_load_edgelist_float_bottom_ids() {
    let file = write_file("top,bottom\nu1,1.5\nu2,2.0\nu2,1.5\n");
    let mut net = BipartiteNetwork::new();
    net.load_edgelist(file.path(), &EdgeListConfig::default()).unwrap();

    assert_eq!(net.shape(), (2, 2));
    assert_eq!(net.bottom_index().get(&NodeKey::from(2.0)), Some(1));
    let (_, bottom) = net.degrees().unwrap();
    assert_eq!(bottom.get(&NodeKey::from(1.5)), Some(2));
}

#[test]
fn test_cells_typed_from_raw_text() {
    // " t1" is not "t1", and " 7" is not 7: no cell is trimmed
    let data = "top,bottom\nt1,7\n t1, 7\n";
    let table = read_edge_table(data.as_bytes(), &EdgeListConfig::default()).unwrap();
    let net = BipartiteNetwork::from_table(&table, "top", "bottom", None).unwrap();
    assert_eq!(net.top_index().ids(), &[NodeKey::from("t1"), NodeKey::from(" t1")]);
    assert_eq!(net.bottom_index().ids(), &[NodeKey::Int(7), NodeKey::from(" 7")]);
}
