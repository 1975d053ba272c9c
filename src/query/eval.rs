use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

use super::types::{CmpOp, Filter, SortSpec};

const MAX_PATH_DEPTH: usize = 32;

pub fn eval_filter(doc: &BsonDocument, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Cmp { path, op, value } => {
            if let Some(v) = get_path(doc, path) {
                match op {
                    CmpOp::Eq => v == value,
                    CmpOp::Gt => compare_bson(v, value) == Ordering::Greater,
                    CmpOp::Gte => compare_bson(v, value) != Ordering::Less,
                    CmpOp::Lt => compare_bson(v, value) == Ordering::Less,
                    CmpOp::Lte => compare_bson(v, value) != Ordering::Greater,
                }
            } else {
                false
            }
        }
        Filter::In { path, values } => match get_path(doc, path) {
            // An array field matches if any of its elements is in the set.
            Some(Bson::Array(items)) => items.iter().any(|v| values.contains(v)),
            Some(v) => values.contains(v),
            None => false,
        },
        Filter::Regex { path, pattern, case_insensitive } => {
            if let Some(Bson::String(s)) = get_path(doc, path) {
                let mut re = regex::RegexBuilder::new(pattern);
                re.case_insensitive(*case_insensitive);
                if let Ok(r) = re.build() { r.is_match(s) } else { false }
            } else {
                false
            }
        }
    }
}

/// Stable multi-key comparison; ties are left to the (stable) sort, so equal
/// keys keep insertion order.
pub fn compare_docs(a: &BsonDocument, b: &BsonDocument, sort: &[SortSpec]) -> Ordering {
    for s in sort {
        let va = a.get(&s.field);
        let vb = b.get(&s.field);
        let ord = match (va, vb) {
            (Some(x), Some(y)) => compare_bson(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return if matches!(s.order, super::types::Order::Asc) { ord } else { ord.reverse() };
        }
    }
    Ordering::Equal
}

fn get_path<'a>(doc: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    if path.is_empty() || path.len() > 1024 {
        return None;
    }
    let mut cur = doc;
    let mut segs = 0usize;
    let parts = path.split('.');
    let last = parts.clone().next_back().unwrap_or("");
    for part in parts {
        segs += 1;
        if segs > MAX_PATH_DEPTH {
            return None;
        }
        match cur.get(part) {
            Some(Bson::Document(d)) => cur = d,
            Some(v) if part == last => return Some(v),
            _ => return None,
        }
    }
    None
}

pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    use bson::Bson as T;
    fn is_num(x: &T) -> bool {
        matches!(x, T::Int32(_) | T::Int64(_) | T::Double(_))
    }
    if is_num(a) && is_num(b) {
        let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) else { return Ordering::Equal };
        return x.total_cmp(&y);
    }
    match (a, b) {
        (T::String(x), T::String(y)) => x.cmp(y),
        (T::Boolean(x), T::Boolean(y)) => x.cmp(y),
        // ObjectId bytes start with the creation timestamp, so this orders by
        // creation time with the identity value breaking ties.
        (T::ObjectId(x), T::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (T::DateTime(x), T::DateTime(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

pub fn as_f64(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn type_rank(v: &Bson) -> u8 {
    use bson::Bson as T;
    match v {
        T::Null => 0,
        T::Boolean(_) => 1,
        T::Int32(_) => 2,
        T::Int64(_) => 3,
        T::Double(_) => 4,
        T::String(_) => 5,
        T::Array(_) => 6,
        T::Document(_) => 7,
        T::ObjectId(_) => 8,
        T::DateTime(_) => 9,
        _ => 250,
    }
}
