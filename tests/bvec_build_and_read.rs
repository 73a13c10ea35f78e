use branchwood::BVec;

#[test]
fn builds_from_iterator_and_reads_back_in_order() {
    let v: BVec<i32> = (0..5_000).collect();
    assert_eq!(v.len(), 5_000);
    for i in 0..5_000 {
        assert_eq!(*v.get(i).unwrap(), i as i32);
    }
    assert!(v.get(5_000).is_none());
}

#[test]
fn push_back_then_pop_back_visits_every_element() {
    let mut v: BVec<i32> = BVec::new();
    for i in 0..777 {
        v = v.push_back(i);
    }
    let mut popped = Vec::new();
    loop {
        let (next, value) = v.pop_back();
        v = next;
        match value {
            Some(x) => popped.push(x),
            None => break,
        }
    }
    popped.reverse();
    assert_eq!(popped, (0..777).collect::<Vec<_>>());
}

#[test]
fn clone_is_cheap_and_independent() {
    let a: BVec<i32> = (0..1_000).collect();
    let b = a.clone();
    let c = b.set(500, -1).unwrap();
    assert_eq!(*a.get(500).unwrap(), 500);
    assert_eq!(*b.get(500).unwrap(), 500);
    assert_eq!(*c.get(500).unwrap(), -1);
}
