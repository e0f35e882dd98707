//! No-op executor contract tests.

use searchbed_core::domain::HttpAuth;
use searchbed_executor::{ElasticsearchNode, NoopElasticsearch};

#[test]
fn test_running_is_constant_true() {
    let plain = NoopElasticsearch::new("search.internal", 9200, None);
    let secured = NoopElasticsearch::new(
        "127.0.0.1",
        19200,
        Some(HttpAuth::new("elastic", "secret")),
    );

    assert!(plain.running());
    assert!(secured.running());
}

#[test]
fn test_connection_details_are_inspectable() {
    let auth = HttpAuth::new("elastic", "secret");
    let node = NoopElasticsearch::new("search.internal", 9200, Some(auth.clone()));

    assert_eq!(node.host(), "search.internal");
    assert_eq!(node.port(), 9200);
    assert_eq!(node.http_auth(), Some(&auth));
}

#[test]
fn test_usable_through_the_node_interface() {
    // callers hold the interface, not a concrete executor type
    let node: Box<dyn ElasticsearchNode> =
        Box::new(NoopElasticsearch::new("127.0.0.1", 9200, None));

    assert!(node.running());
    assert_eq!(node.port(), 9200);
}
