use xlint_core::{DocumentNode, ExtensionLocation, StructuralPath};

/// Operation keys of a path item, in the order their parameters are checked.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Operations whose request bodies are checked: create, update, partial update.
pub const BODY_METHODS: [&str; 3] = ["post", "put", "patch"];

/// An entry a rule's field must sit on directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionTarget<'a> {
    pub path: StructuralPath,
    pub entry: &'a DocumentNode,
}

pub fn collect_targets(
    document: &DocumentNode,
    location: ExtensionLocation,
) -> Vec<ExtensionTarget<'_>> {
    let mut targets = Vec::new();
    match location {
        ExtensionLocation::Root => targets.push(ExtensionTarget {
            path: StructuralPath::root(),
            entry: document,
        }),
        ExtensionLocation::Servers => {
            push_sequence_entries(document, &StructuralPath::root(), "servers", &mut targets)
        }
        ExtensionLocation::Tags => {
            push_sequence_entries(document, &StructuralPath::root(), "tags", &mut targets)
        }
        ExtensionLocation::Parameters => {
            for (item_path, path_item) in path_items(document) {
                push_sequence_entries(path_item, &item_path, "parameters", &mut targets);
                for method in HTTP_METHODS {
                    if let Some(operation) = path_item.get(method) {
                        let operation_path = item_path.child_key(method);
                        push_sequence_entries(operation, &operation_path, "parameters", &mut targets);
                    }
                }
            }
        }
        ExtensionLocation::RequestBody => {
            for (item_path, path_item) in path_items(document) {
                for method in BODY_METHODS {
                    let Some(body) = path_item.get(method).and_then(|operation| operation.get("requestBody"))
                    else {
                        continue;
                    };
                    targets.push(ExtensionTarget {
                        path: item_path.child_key(method).child_key("requestBody"),
                        entry: body,
                    });
                }
            }
        }
    }
    targets
}

/// Path items under `paths`, skipping `x-` keys and non-mapping values.
fn path_items(document: &DocumentNode) -> Vec<(StructuralPath, &DocumentNode)> {
    let Some(paths) = document.get("paths").and_then(DocumentNode::as_mapping) else {
        return Vec::new();
    };
    paths
        .fields()
        .filter(|(_, item)| item.as_mapping().is_some())
        .map(|(key, item)| (StructuralPath::root().child_key("paths").child_key(key), item))
        .collect()
}

fn push_sequence_entries<'a>(
    parent: &'a DocumentNode,
    parent_path: &StructuralPath,
    key: &str,
    targets: &mut Vec<ExtensionTarget<'a>>,
) {
    let Some(entries) = parent.get(key).and_then(DocumentNode::as_sequence) else {
        return;
    };
    let sequence_path = parent_path.child_key(key);
    for (index, entry) in entries.iter().enumerate() {
        targets.push(ExtensionTarget {
            path: sequence_path.child_index(index),
            entry,
        });
    }
}
