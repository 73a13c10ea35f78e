use branchwood::HashMap;

/// Keys whose `Hash` impl only ever produces a handful of distinct digests,
/// forcing the CHAMP engine down the collision-node path regardless of the
/// runtime SipHash seed.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Clumped(u64);

impl std::hash::Hash for Clumped {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.0 % 4).hash(state);
    }
}

#[test]
fn heavily_colliding_keys_still_round_trip() {
    let m: HashMap<Clumped, u64> = (0..500).map(|i| (Clumped(i), i)).collect();
    assert_eq!(m.len(), 500);
    for i in 0..500 {
        assert_eq!(*m.get(&Clumped(i)).unwrap(), i);
    }
}

#[test]
fn erasing_one_colliding_key_leaves_its_siblings_intact() {
    let m: HashMap<Clumped, u64> = (0..100).map(|i| (Clumped(i), i)).collect();
    let m2 = m.erase(&Clumped(50));
    assert!(m2.get(&Clumped(50)).is_none());
    for i in (0..100).filter(|&i| i != 50) {
        assert_eq!(*m2.get(&Clumped(i)).unwrap(), i);
    }
    assert_eq!(m2.len(), 99);
}

#[test]
fn overwriting_a_colliding_key_replaces_only_that_entry() {
    let m: HashMap<Clumped, u64> = (0..20).map(|i| (Clumped(i), i)).collect();
    let m2 = m.set(Clumped(7), 9_999);
    assert_eq!(*m2.get(&Clumped(7)).unwrap(), 9_999);
    assert_eq!(m2.len(), 20);
    for i in (0..20).filter(|&i| i != 7) {
        assert_eq!(*m2.get(&Clumped(i)).unwrap(), i);
    }
}
