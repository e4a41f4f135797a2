use std::cell::RefCell;
use std::rc::Rc;

use crate::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_signal_basic() {
    let sig = signal(42);
    assert_eq!(sig.get(), 42);

    sig.set(100);
    assert_eq!(sig.get(), 100);

    sig.update(|v| *v += 1);
    assert_eq!(sig.get(), 101);
    assert_eq!(sig.with(|v| *v * 2), 202);
}

#[test]
fn test_signal_subscription_order_and_unsubscribe() {
    let sig = signal(0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let a = {
        let seen = seen.clone();
        sig.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
    };
    {
        let seen = seen.clone();
        sig.subscribe(move |v| seen.borrow_mut().push(("b", *v)));
    }

    sig.set(1);
    assert!(sig.unsubscribe(a));
    assert!(!sig.unsubscribe(a));
    {
        let seen = seen.clone();
        sig.subscribe(move |v| seen.borrow_mut().push(("c", *v)));
    }
    sig.set(2);

    assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("b", 2), ("c", 2)]);
    assert_eq!(sig.subscriber_count(), 2);
}

#[test]
fn test_signal_identity_survives_writes() {
    let a = signal(String::from("x"));
    let b = a.clone();
    b.set("y".into());
    assert!(a.ptr_eq(&b));
    assert_eq!(a.get(), "y");
    assert!(!a.ptr_eq(&signal(String::from("y"))));
}

#[test]
fn test_subscriber_may_read_its_signal() {
    let sig = signal(1);
    let doubled = signal(0);
    {
        let (sig2, doubled) = (sig.clone(), doubled.clone());
        sig.subscribe(move |_| doubled.set(sig2.get() * 2));
    }
    sig.set(21);
    assert_eq!(doubled.get(), 42);
}

#[test]
fn test_subscriber_may_write_its_signal() {
    let level = signal(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let level2 = level.clone();
        level.subscribe(move |v| {
            if *v > 10 {
                level2.set(10);
            }
        });
    }
    {
        let seen = seen.clone();
        level.subscribe(move |v| seen.borrow_mut().push(*v));
    }

    level.set(15);
    assert_eq!(level.get(), 10);
    // The clamped write supersedes 15 before the second subscriber runs.
    assert_eq!(*seen.borrow(), vec![10]);

    level.set(3);
    assert_eq!(*seen.borrow(), vec![10, 3]);
}

#[test]
fn test_subscriber_may_update_its_signal() {
    let items = signal(vec![1]);
    {
        let items2 = items.clone();
        items.subscribe(move |v| {
            if v.len() < 3 {
                items2.update(|v| v.push(v.len() + 1));
            }
        });
    }
    items.update(|v| v.push(2));
    assert_eq!(items.get(), vec![1, 2, 3]);
}

#[test]
fn test_watch_fires_only_on_change() {
    let sig = signal(false);
    let calls = Rc::new(RefCell::new(Vec::new()));
    let stop = {
        let calls = calls.clone();
        watch(&sig, move |now, was| calls.borrow_mut().push((*now, *was)))
    };

    sig.set(false);
    sig.set(true);
    sig.set(true);
    sig.set(false);
    stop.run();
    sig.set(true);

    assert_eq!(*calls.borrow(), vec![(true, false), (false, true)]);
    assert!(stop.is_disposed());
}

#[test]
fn test_watch_stops_with_instance() {
    let sig = signal(0);
    let hits = Rc::new(RefCell::new(0));
    let instance = Instance::new("Watcher");
    instance.run(|| {
        let hits = hits.clone();
        watch(&sig, move |_, _| *hits.borrow_mut() += 1);
    });

    sig.set(1);
    instance.dispose();
    sig.set(2);

    assert_eq!(*hits.borrow(), 1);
    assert_eq!(sig.subscriber_count(), 0);
}

#[test]
fn test_dispose_runs_once() {
    let count = Rc::new(RefCell::new(0));
    let d = {
        let count = count.clone();
        Dispose::new(move || *count.borrow_mut() += 1)
    };
    d.run();
    d.clone().run();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_current_instance_is_scoped_to_run() {
    assert!(current_instance().is_none());

    let outer = Instance::new("Outer");
    let inner = outer.child("Inner");
    outer.run(|| {
        assert!(current_instance().is_some_and(|i| i.ptr_eq(&outer)));
        inner.run(|| {
            let name = current_instance().map(|i| i.name().to_owned());
            assert_eq!(name.as_deref(), Some("Inner"));
        });
        assert!(current_instance().is_some_and(|i| i.ptr_eq(&outer)));
    });

    assert!(current_instance().is_none());
}

#[test]
fn test_current_instance_restored_after_panic() {
    let instance = Instance::new("Panicky");
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _: () = instance.run(|| panic!("render failed"));
    }));
    assert!(result.is_err());
    assert!(current_instance().is_none());
}

#[test]
fn test_emit_reaches_listeners() {
    init_logger();
    let instance = Instance::new("Input");
    let got = Rc::new(RefCell::new(Vec::new()));
    {
        let got = got.clone();
        instance.on("update:value", move |payload| {
            if let Some(s) = payload.downcast_ref::<String>() {
                got.borrow_mut().push(s.clone());
            }
        });
    }

    assert_eq!(instance.emit("update:value", &String::from("B")), 1);
    assert_eq!(instance.emit("blur", &()), 0);
    assert_eq!(*got.borrow(), vec!["B".to_string()]);
}

#[test]
fn test_dispose_children_before_parent() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let parent = Instance::new("Parent");
    let child = parent.child("Child");
    {
        let order = order.clone();
        parent.add_disposer(move || order.borrow_mut().push("parent"));
    }
    {
        let order = order.clone();
        child.add_disposer(move || order.borrow_mut().push("child"));
    }
    drop(child);

    parent.dispose();
    assert_eq!(*order.borrow(), vec!["child", "parent"]);
}

#[test]
fn test_inject_walks_ancestors() {
    let root = Instance::new("App");
    let key = InjectionKey::<u32>::described("answer");
    root.provide(&key, 42);
    root.provide("theme", String::from("dark"));

    let mid = root.child("Layout");
    mid.provide("theme", String::from("light"));
    let leaf = mid.child("Button");

    leaf.run(|| {
        assert_eq!(inject(&key), Some(42));
        assert_eq!(inject::<String, _>("theme").as_deref(), Some("light"));
        assert_eq!(inject::<String, _>("missing"), None);
        let theme: String = inject_or("missing", "fallback".into());
        assert_eq!(theme, "fallback");
    });

    // An instance does not see its own provides.
    root.run(|| assert_eq!(inject(&key), None));
}

#[test]
fn test_inject_outside_instance_is_none() {
    init_logger();
    let key = InjectionKey::<u32>::new();
    assert_eq!(inject(&key), None);
}

#[test]
fn test_injection_keys_are_unique() {
    let a = InjectionKey::<u8>::described("same");
    let b = InjectionKey::<u8>::described("same");
    let root = Instance::new("Root");
    root.provide(&a, 1);
    root.child("Leaf").run(|| {
        assert_eq!(inject(&a), Some(1));
        assert_eq!(inject(&b), None);
    });
    assert_eq!(Key::<u8>::display_name(&a), "same");
    assert_eq!(Key::<u8>::display_name(&InjectionKey::<u8>::new()), "Symbol()");
}

#[test]
fn test_inject_type_mismatch_is_none() {
    let root = Instance::new("Root");
    root.provide("count", 3_u64);
    let leaf = root.child("Leaf");
    leaf.run(|| assert_eq!(inject::<String, _>("count"), None));
}

#[test]
fn test_mount_records_element() {
    let instance = Instance::new("Greeting");
    let node = instance.mount(|h| Some(h.el("div", ["Hello, <world>"])));
    assert_eq!(node.to_html(), "<div>Hello, &lt;world&gt;</div>");
    assert_eq!(instance.el(), Some(node));

    let empty = Instance::new("Nothing");
    assert_eq!(empty.mount(|_| None).to_html(), "<!---->");
}

#[test]
fn test_render_runs_inside_instance() {
    let instance = Instance::new("Probe");
    let node = instance.mount(|h| {
        let name = current_instance()
            .map(|i| i.name().to_owned())
            .unwrap_or_default();
        Some(h.text(name))
    });
    assert_eq!(node, Node::Text("Probe".into()));
}

#[test]
fn test_element_builder() {
    let mut list = Element::new("ul").attr("class", "a \"b\"");
    list.append(Element::new("li").child("one"));
    list.append(Node::Comment("gap".into()));
    assert_eq!(list.children().len(), 2);
    assert_eq!(
        list.to_html(),
        "<ul class=\"a &quot;b&quot;\"><li>one</li><!--gap--></ul>"
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::missing_context("useThing").to_string(),
        "'useThing' must be called from inside a setup function"
    );
    assert_eq!(Error::unresolved("api").to_string(), "Could not resolve api");
}
