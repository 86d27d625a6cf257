use std::sync::Once;

use flexi_logger::{LogSpecification, Logger, WriteMode};
use serde_json::{json, Value};

use crate::access::Node;
use crate::data::TreeData;

static LOGGER: Once = Once::new();

pub(crate) fn setup_logger() {
    LOGGER.call_once(|| {
        if let Ok(handle) = Logger::with(LogSpecification::trace())
            .write_mode(WriteMode::Direct)
            .start()
        {
            // keep the logger alive for the whole test binary
            std::mem::forget(handle);
        }
    });
}

pub(crate) fn node(value: Value) -> Node {
    match value {
        Value::Object(node) => node,
        other => panic!("not an object: {}", other),
    }
}

/// ```text
/// root
/// |-- a
/// |   |-- c
/// |   `-- d
/// `-- b
/// ```
pub(crate) fn sample_tree() -> Node {
    node(json!({
        "id": "root",
        "children": [
            { "id": "a", "children": [{ "id": "c" }, { "id": "d" }] },
            { "id": "b" }
        ]
    }))
}

pub(crate) fn sample_data() -> TreeData {
    TreeData::Single(sample_tree())
}

pub(crate) fn ids(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| match n.get("id") {
            Some(Value::String(id)) => id.clone(),
            other => format!("{:?}", other),
        })
        .collect()
}
