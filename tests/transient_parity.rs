use branchwood::{BVec, Error, HashMap, HashSet, PBox, RRBVec};

/// A transient's bulk-edit result matches what the same sequence of edits
/// would produce through the purely persistent API, and every container's
/// transient rejects use after `persistent()`.

#[test]
fn bvec_transient_matches_persistent_sequence() {
    let base: BVec<i32> = (0..400).collect();
    let mut t = base.transient();
    for i in 400..500 {
        t.push_back(i).unwrap();
    }
    t.set(0, -1).unwrap();
    t.pop_back().unwrap();
    let built = t.persistent().unwrap();

    let mut expected = base;
    for i in 400..500 {
        expected = expected.push_back(i);
    }
    expected = expected.set(0, -1).unwrap();
    let (expected, _) = expected.pop_back();

    assert_eq!(built, expected);
}

#[test]
fn rrbvec_transient_matches_persistent_sequence() {
    let base: RRBVec<i32> = (0..200).collect();
    let mut t = base.transient();
    t.push_front(-1).unwrap();
    t.insert(100, 999).unwrap();
    t.erase(0).unwrap();
    let built = t.persistent().unwrap();

    let expected = base.push_front(-1).insert(100, 999).unwrap().erase(0).unwrap();
    assert_eq!(built, expected);
}

#[test]
fn hashmap_and_hashset_transients_match_persistent_sequence() {
    let base_map: HashMap<u64, i32> = (0..50).map(|i| (i, i as i32)).collect();
    let mut tm = base_map.transient();
    tm.set(1000, -1).unwrap();
    tm.erase(&0).unwrap();
    let built_map = tm.persistent().unwrap();
    assert_eq!(built_map, base_map.set(1000, -1).erase(&0));

    let base_set: HashSet<i32> = (0..50).collect();
    let mut ts = base_set.transient();
    ts.insert(1000).unwrap();
    ts.erase(&0).unwrap();
    let built_set = ts.persistent().unwrap();
    assert_eq!(built_set, base_set.insert(1000).erase(&0));
}

#[test]
fn every_transient_rejects_use_after_persistent() {
    let mut bt = BVec::<i32>::new().transient();
    bt.push_back(1).unwrap();
    bt.persistent().unwrap();
    assert_eq!(bt.push_back(2), Err(Error::TransientMisuse));

    let mut pt = PBox::new(1).transient();
    pt.persistent().unwrap();
    assert_eq!(pt.set(2), Err(Error::TransientMisuse));
}
