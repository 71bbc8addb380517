#[cfg(test)]
mod tests {
    use crate::meta::*;
    use crate::class::{Member, Namespace};
    use crate::value::Value;
    use std::sync::Arc;

    fn noop() -> impl Fn(&Value, &crate::CallArgs) -> crate::ValueResult<Value> + Send + Sync {
        |_, _| Ok(Value::Nil)
    }

    // ===== Policy Tests =====

    #[test]
    fn test_policy_combination() {
        assert_eq!(Policy::Weak.combine(Policy::Weak), Some(Policy::Weak));
        assert_eq!(Policy::Weak.combine(Policy::Strong), Some(Policy::Strong));
        assert_eq!(Policy::Safe.combine(Policy::Weak), Some(Policy::Safe));
        assert_eq!(Policy::Strong.combine(Policy::Strong), Some(Policy::Strong));
        assert_eq!(Policy::Strong.combine(Policy::Safe), None);
        assert_eq!(Policy::Safe.combine(Policy::Strong), None);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(Policy::default(), Policy::Weak);
        assert_eq!(Policy::Strong.to_string(), "strong");
    }

    // ===== Declared Callables Tests =====

    #[test]
    fn test_declared_callables() {
        let ns = Namespace::new()
            .method("run", noop())
            .method("__init__", noop())
            .method("_Hidden__x", noop())
            .abstract_method("later")
            .attribute("value", 1i64);

        let all: Vec<&str> = declared_callables(&ns, false).into_iter().collect();
        assert_eq!(all, vec!["_Hidden__x", "__init__", "run"]);

        let plain: Vec<&str> = declared_callables(&ns, true).into_iter().collect();
        assert_eq!(plain, vec!["run"]);
    }

    #[test]
    fn test_special_names() {
        assert!(is_special_name("__getitem__"));
        assert!(is_special_name("_Cls__private"));
        assert!(!is_special_name("_private"));
        assert!(!is_special_name("area"));
    }

    // ===== Strong Policy Tests =====

    #[test]
    fn test_strong_rejects_missing_implementation() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Strong)
            .abstract_method("f")
            .build()
            .unwrap();
        let err = ClassBuilder::new("Child")
            .base(Arc::clone(&parent))
            .method("g", noop())
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Can't create abstract class Child! Child must implement abstract \
             method f of class Parent."
        );
        assert_eq!(err.class_name(), Some("Child"));
        assert_eq!(err.base(), Some("Parent"));
    }

    #[test]
    fn test_strong_accepts_deferral() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Strong)
            .abstract_method("f")
            .build()
            .unwrap();
        let middle = ClassBuilder::new("Middle")
            .base(Arc::clone(&parent))
            .abstract_method("f")
            .build()
            .unwrap();
        assert_eq!(middle.policy(), Policy::Strong);
        assert!(middle.is_abstract());

        let leaf = ClassBuilder::new("Leaf")
            .base(middle)
            .method("f", noop())
            .build()
            .unwrap();
        assert!(!leaf.is_abstract());
    }

    #[test]
    fn test_strong_reports_first_unmet_obligation() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Strong)
            .abstract_method("zeta")
            .abstract_method("alpha")
            .build()
            .unwrap();
        let err = ClassBuilder::new("Child").base(parent).build().unwrap_err();
        assert_eq!(err.method(), Some("alpha"));
    }

    #[test]
    fn test_strong_ignores_obligations_resolved_by_a_sibling_base() {
        let iface = ClassBuilder::new("Iface")
            .policy(Policy::Strong)
            .abstract_method("run")
            .build()
            .unwrap();
        let mixin = ClassBuilder::new("Mixin")
            .method("run", noop())
            .build()
            .unwrap();
        let class = ClassBuilder::new("Both")
            .base(mixin)
            .base(iface)
            .build()
            .unwrap();
        assert_eq!(class.policy(), Policy::Strong);
    }

    #[test]
    fn test_strong_treats_attribute_as_resolution() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Strong)
            .abstract_method("f")
            .build()
            .unwrap();
        let child = ClassBuilder::new("Child")
            .base(parent)
            .attribute("f", 3i64)
            .build()
            .unwrap();
        // the attribute resolves first, so nothing is left abstract
        assert!(!child.is_abstract());
    }

    // ===== Safe Policy Tests =====

    #[test]
    fn test_safe_rejects_shadowing() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Safe)
            .method("f", noop())
            .build()
            .unwrap();
        let err = ClassBuilder::new("Child")
            .base(parent)
            .method("f", noop())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ShadowedMethod {
                class_name: "Child".to_string(),
                method: "f".to_string(),
                base: "Parent".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Can't create abstract class Child! Method f is already implemented \
             in class Parent."
        );
    }

    #[test]
    fn test_safe_rejects_shadowing_inherited_members() {
        let root = ClassBuilder::new("Root")
            .policy(Policy::Safe)
            .attribute("f", 1i64)
            .build()
            .unwrap();
        let parent = ClassBuilder::new("Parent").base(root).build().unwrap();
        let err = ClassBuilder::new("Child")
            .base(parent)
            .method("f", noop())
            .build()
            .unwrap_err();
        assert_eq!(err.base(), Some("Parent"));
    }

    #[test]
    fn test_safe_permits_special_names_and_new_methods() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Safe)
            .method("__init__", noop())
            .method("f", noop())
            .build()
            .unwrap();
        let child = ClassBuilder::new("Child")
            .base(parent)
            .method("__init__", noop())
            .method("g", noop())
            .build()
            .unwrap();
        assert_eq!(child.policy(), Policy::Safe);
    }

    #[test]
    fn test_safe_rejects_implementing_inherited_abstract_members() {
        let parent = ClassBuilder::new("Parent")
            .policy(Policy::Safe)
            .abstract_method("f")
            .build()
            .unwrap();
        let err = ClassBuilder::new("Child")
            .base(parent)
            .method("f", noop())
            .build()
            .unwrap_err();
        assert!(matches!(err, ContractError::ShadowedMethod { .. }));
    }

    // ===== Weak Policy Tests =====

    #[test]
    fn test_weak_accepts_everything_consistent() {
        let parent = ClassBuilder::new("Parent")
            .abstract_method("f")
            .method("g", noop())
            .build()
            .unwrap();
        let child = ClassBuilder::new("Child")
            .base(parent)
            .method("g", noop())
            .build()
            .unwrap();
        assert_eq!(child.policy(), Policy::Weak);
        assert!(child.is_abstract());
    }

    // ===== Builder Tests =====

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(
            ClassBuilder::new("  ").build().unwrap_err(),
            ContractError::EmptyName
        );
    }

    #[test]
    fn test_duplicate_base_is_rejected() {
        let base = ClassBuilder::new("Base").build().unwrap();
        let err = ClassBuilder::new("Twice")
            .base(Arc::clone(&base))
            .base(base)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate base class Base in definition of Twice"
        );
    }

    #[test]
    fn test_conflicting_policies_need_an_explicit_binding() {
        let strong = ClassBuilder::new("S")
            .policy(Policy::Strong)
            .build()
            .unwrap();
        let safe = ClassBuilder::new("F").policy(Policy::Safe).build().unwrap();

        let err = ClassBuilder::new("Mixed")
            .base(Arc::clone(&strong))
            .base(Arc::clone(&safe))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::PolicyConflict {
                class_name: "Mixed".to_string(),
                base: "F".to_string(),
                inherited: Policy::Strong,
                found: Policy::Safe,
            }
        );

        let mixed = ClassBuilder::new("Mixed")
            .bases([strong, safe])
            .policy(Policy::Weak)
            .build()
            .unwrap();
        assert_eq!(mixed.policy(), Policy::Weak);
    }

    #[test]
    fn test_define_class_matches_builder() {
        let parent = define_class(
            "Parent",
            vec![],
            Namespace::new().abstract_method("f"),
            Policy::Strong,
        )
        .unwrap();
        let err = define_class("Child", vec![parent], Namespace::new(), Policy::Strong)
            .unwrap_err();
        assert_eq!(err.method(), Some("f"));
    }

    #[test]
    fn test_builder_member_and_namespace() {
        let class = ClassBuilder::new("Config")
            .namespace(Namespace::new().attribute("a", 1i64))
            .member("b", Member::Attribute(Value::Integer(2)))
            .build()
            .unwrap();
        assert_eq!(class.namespace().len(), 2);
        assert!(class.has_member("a"));
    }

    #[test]
    fn test_validator_dispatch() {
        let parent = ClassBuilder::new("Parent")
            .abstract_method("f")
            .build()
            .unwrap();
        let child = ClassBuilder::new("Child").base(parent).build().unwrap();

        assert!(ContractValidator::new(Policy::Weak).validate(&child).is_ok());
        assert!(ContractValidator::new(Policy::Safe).validate(&child).is_ok());
        assert!(ContractValidator::new(Policy::Strong)
            .validate(&child)
            .is_err());
        assert!(validate_weak(&child).is_ok());
        assert_eq!(abstract_set(&child).len(), 1);
    }

    // ===== Marker Tests =====

    #[test]
    fn test_markers_bind_policy_through_inheritance() {
        let parent = ClassBuilder::new("Parent")
            .base(markers::strong_base())
            .abstract_method("f")
            .build()
            .unwrap();
        assert_eq!(parent.policy(), Policy::Strong);
        assert!(ClassBuilder::new("Child").base(parent).build().is_err());
    }

    #[test]
    fn test_markers_are_shared_roots() {
        assert!(Arc::ptr_eq(&markers::safe_base(), &markers::safe_base()));
        assert!(Arc::ptr_eq(
            &markers::marker(Policy::Weak),
            &markers::weak_base()
        ));
        assert_eq!(
            markers::by_name("StrongBase").map(|c| c.policy()),
            Some(Policy::Strong)
        );
        assert!(markers::by_name("Object").is_none());
    }

    // ===== Registry Tests =====

    #[test]
    fn test_registry_keeps_accepted_classes_only() {
        let registry = ClassRegistry::new();
        let parent = registry
            .define(
                ClassBuilder::new("Parent")
                    .policy(Policy::Strong)
                    .abstract_method("f"),
            )
            .unwrap();
        assert!(registry
            .define(ClassBuilder::new("Child").base(parent))
            .is_err());
        assert_eq!(registry.names(), vec!["Parent"]);
        assert!(!registry.contains("Child"));
    }

    #[test]
    fn test_registry_redefinition_replaces_binding() {
        let registry = ClassRegistry::with_markers();
        assert_eq!(registry.len(), 3);

        let first = registry.define(ClassBuilder::new("Thing")).unwrap();
        let second = registry.define(ClassBuilder::new("Thing")).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&registry.get("Thing").unwrap(), &second));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_global_registry_has_markers() {
        assert!(ClassRegistry::global().contains(markers::SAFE_BASE));
    }
}
