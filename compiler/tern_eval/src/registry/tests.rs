use super::*;
use crate::object::{make_class, make_closure, make_instance};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use tern_ir::{FunctionDecl, FunctionKind, Span, StringInterner};

fn decl(interner: &StringInterner, name: &str) -> Rc<FunctionDecl> {
    Rc::new(FunctionDecl {
        name: interner.intern(name),
        params: Vec::new(),
        body: Vec::new(),
        kind: FunctionKind::Function,
        span: Span::DUMMY,
        line: 1,
    })
}

#[test]
fn teardown_breaks_environment_cycle() {
    let interner = StringInterner::new();
    let mut registry = ObjectRegistry::new();
    let env = Environment::global();
    registry.track_env(&env);
    // The closure captures the environment that binds it.
    let closure = make_closure(decl(&interner, "f"), env.clone());
    env.define(interner.intern("f"), Value::Closure(closure));
    let weak = env.downgrade();
    drop(env);
    assert!(weak.upgrade().is_some());

    registry.teardown();
    assert!(weak.upgrade().is_none());
}

#[test]
fn teardown_breaks_instance_cycle() {
    let interner = StringInterner::new();
    let mut registry = ObjectRegistry::new();
    let class = make_class(interner.intern("Node"), None, FxHashMap::default());
    let instance = make_instance(class);
    registry.track_instance(&instance);
    instance.set_field(interner.intern("me"), Value::Instance(Rc::clone(&instance)));
    let weak = Rc::downgrade(&instance);
    drop(instance);
    assert!(weak.upgrade().is_some());

    registry.teardown();
    assert!(weak.upgrade().is_none());
}

#[test]
fn teardown_breaks_vec_self_reference() {
    let mut registry = ObjectRegistry::new();
    let items = Shared::new(Vec::new());
    registry.track_vec(&items);
    items.borrow_mut().push(Value::Vec(items.clone()));
    let weak = items.downgrade();
    drop(items);
    assert!(weak.upgrade().is_some());

    registry.teardown();
    assert!(weak.upgrade().is_none());
}

#[test]
fn sweep_prunes_dead_entries() {
    let mut registry = ObjectRegistry::new();
    let kept = Environment::global();
    registry.track_env(&kept);
    registry.track_env(&Environment::global());
    assert_eq!(
        registry.live(),
        LiveObjects {
            envs: 1,
            instances: 0,
            vecs: 0
        }
    );
    registry.sweep();
    assert_eq!(registry.envs.len(), 1);
}

#[test]
fn collect_empties_only_unreached_objects() {
    let interner = StringInterner::new();
    let mut registry = ObjectRegistry::new();
    let class = make_class(interner.intern("Node"), None, FxHashMap::default());
    let me = interner.intern("me");

    let kept = make_instance(Rc::clone(&class));
    registry.track_instance(&kept);
    kept.set_field(me, Value::Instance(Rc::clone(&kept)));

    let lost = make_instance(class);
    registry.track_instance(&lost);
    lost.set_field(me, Value::Instance(Rc::clone(&lost)));
    let lost = Rc::downgrade(&lost);

    let globals = Environment::global();
    registry.track_env(&globals);
    globals.define(interner.intern("kept"), Value::Instance(Rc::clone(&kept)));

    let mut marker = Marker::new();
    marker.env(&globals);
    marker.mark();
    assert_eq!(registry.collect(&marker), 1);

    assert!(lost.upgrade().is_none());
    assert_eq!(kept.field_count(), 1);
    assert_eq!(
        registry.live(),
        LiveObjects {
            envs: 1,
            instances: 1,
            vecs: 0
        }
    );
}

#[test]
fn marker_follows_closures_and_vectors() {
    let interner = StringInterner::new();
    let mut registry = ObjectRegistry::new();
    let globals = Environment::global();
    registry.track_env(&globals);

    // globals -> vec -> closure -> captured env -> vec
    let captured = globals.child();
    registry.track_env(&captured);
    let items = Shared::new(Vec::new());
    registry.track_vec(&items);
    captured.define(interner.intern("items"), Value::Vec(items.clone()));
    let closure = make_closure(decl(&interner, "f"), captured.clone());
    items.borrow_mut().push(Value::Closure(closure));
    globals.define(interner.intern("v"), Value::Vec(items.clone()));
    drop(captured);

    let mut marker = Marker::new();
    marker.env(&globals);
    marker.mark();
    assert_eq!(registry.collect(&marker), 0);
    assert_eq!(items.borrow().len(), 1);
    assert_eq!(registry.live().envs, 2);

    globals.define(interner.intern("v"), Value::Nil);
    drop(items);
    let mut marker = Marker::new();
    marker.env(&globals);
    marker.mark();
    registry.collect(&marker);
    assert_eq!(
        registry.live(),
        LiveObjects {
            envs: 1,
            instances: 0,
            vecs: 0
        }
    );
}
