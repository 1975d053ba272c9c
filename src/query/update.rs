use bson::Bson;

use super::types::UpdateDoc;

/// Applies `set`/`push`/`pull` mutations to a document in place.
/// Returns whether anything changed.
pub fn apply_update(doc: &mut bson::Document, upd: &UpdateDoc) -> bool {
    let mut changed = false;
    for (k, v) in &upd.set {
        let old = doc.insert(k.clone(), v.clone());
        if old.as_ref() != Some(v) {
            changed = true;
        }
    }
    for (k, v) in &upd.push {
        match doc.get_mut(k) {
            Some(Bson::Array(items)) => items.push(v.clone()),
            _ => {
                doc.insert(k.clone(), Bson::Array(vec![v.clone()]));
            }
        }
        changed = true;
    }
    for (k, crit) in &upd.pull {
        if let Some(Bson::Array(items)) = doc.get_mut(k) {
            let before = items.len();
            items.retain(|item| !element_matches(item, crit));
            if items.len() != before {
                changed = true;
            }
        }
    }
    changed
}

fn element_matches(item: &Bson, crit: &bson::Document) -> bool {
    let Bson::Document(d) = item else { return false };
    crit.iter().all(|(k, v)| d.get(k) == Some(v))
}
