use branchwood::{BVec, HashMap, HashSet, RRBVec};

/// Every mutating operation on these containers returns a new logical
/// value while leaving the receiver observably unchanged; this is exercised
/// once per container family across a mix of operations.

#[test]
fn bvec_set_and_push_back_leave_receiver_untouched() {
    let a: BVec<i32> = (0..1_000).collect();
    let b = a.set(10, -1).unwrap();
    let c = a.push_back(9999);
    assert_eq!(*a.get(10).unwrap(), 10);
    assert_eq!(*b.get(10).unwrap(), -1);
    assert_eq!(a.len(), 1_000);
    assert_eq!(c.len(), 1_001);
}

#[test]
fn rrbvec_insert_erase_concat_leave_receiver_untouched() {
    let a: RRBVec<i32> = (0..500).collect();
    let b: RRBVec<i32> = (500..1_000).collect();

    let inserted = a.insert(250, -1).unwrap();
    let erased = a.erase(0).unwrap();
    let concatenated = a.concat(&b);

    assert_eq!(a.len(), 500);
    assert_eq!(*a.get(250).unwrap(), 250);
    assert_eq!(inserted.len(), 501);
    assert_eq!(erased.len(), 499);
    assert_eq!(concatenated.len(), 1_000);
}

#[test]
fn hashmap_set_and_erase_leave_receiver_untouched() {
    let a: HashMap<u64, i32> = (0..200).map(|i| (i, i as i32)).collect();
    let b = a.set(10, -1);
    let c = a.erase(&10);
    assert_eq!(*a.get(&10).unwrap(), 10);
    assert_eq!(*b.get(&10).unwrap(), -1);
    assert!(c.get(&10).is_none());
    assert_eq!(a.len(), 200);
}

#[test]
fn hashset_insert_and_erase_leave_receiver_untouched() {
    let a: HashSet<i32> = (0..200).collect();
    let b = a.insert(1_000);
    let c = a.erase(&10);
    assert!(!a.contains(&1_000));
    assert!(b.contains(&1_000));
    assert!(a.contains(&10));
    assert!(!c.contains(&10));
}
