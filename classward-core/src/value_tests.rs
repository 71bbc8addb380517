#[cfg(test)]
mod tests {
    use crate::value::*;
    use crate::ClassBuilder;
    use rustc_hash::FxHashMap;

    fn map_of(entries: &[(&str, Value)]) -> Value {
        let mut map = FxHashMap::default();
        for (k, v) in entries {
            map.insert(k.to_string(), v.clone());
        }
        Value::Map(map)
    }

    // ===== Basic Value Tests =====

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Nil.kind(), ValueKind::Nil);
        assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
        assert_eq!(Value::from("a").kind(), ValueKind::String);
        assert_eq!(Value::List(vec![]).kind(), ValueKind::List);
        assert_eq!(ValueKind::Map.to_string(), "map");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Integer(-3).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::List(vec![Value::Nil]).is_truthy());
    }

    // ===== Text Conversion Tests =====

    #[test]
    fn test_repr() {
        assert_eq!(Value::Nil.repr(), "None");
        assert_eq!(Value::Boolean(true).repr(), "True");
        assert_eq!(Value::Float(2.0).repr(), "2.0");
        assert_eq!(Value::Float(2.5).repr(), "2.5");
        assert_eq!(Value::from("it's").repr(), "'it\\'s'");
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::from("a")]).repr(),
            "[1, 'a']"
        );
        assert_eq!(
            map_of(&[("b", Value::Integer(2)), ("a", Value::Integer(1))]).repr(),
            "{'a': 1, 'b': 2}"
        );
    }

    #[test]
    fn test_display_prints_strings_raw() {
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::Nil.to_string(), "None");
        assert_eq!(
            Value::List(vec![Value::from("x")]).to_string(),
            "['x']"
        );
    }

    #[test]
    fn test_object_text_uses_special_methods() {
        let class = ClassBuilder::new("Named")
            .method("__str__", |_, _| Ok(Value::from("a named thing")))
            .method("__repr__", |_, _| Ok(Value::from("Named()")))
            .build()
            .unwrap();
        let obj = class.instantiate(&CallArgs::new()).unwrap();
        assert_eq!(obj.to_string(), "a named thing");
        assert_eq!(obj.repr(), "Named()");

        let plain = ClassBuilder::new("Plain").build().unwrap();
        let obj = plain.instantiate(&CallArgs::new()).unwrap();
        assert_eq!(obj.repr(), "<Plain object>");
        assert_eq!(obj.to_string(), "<Plain object>");
    }

    // ===== Member Access Tests =====

    #[test]
    fn test_builtin_methods() {
        let s = Value::from("  Hi ");
        assert_eq!(
            s.call_method("strip", &CallArgs::new()).unwrap(),
            Value::from("Hi")
        );
        assert_eq!(
            Value::from("abc")
                .call_method("upper", &CallArgs::new())
                .unwrap(),
            Value::from("ABC")
        );

        let list = Value::List(vec![Value::Integer(1), Value::Integer(1), Value::Integer(2)]);
        assert_eq!(
            list.call_method("count", &CallArgs::new().arg(1i64)).unwrap(),
            Value::Integer(2)
        );

        let map = map_of(&[("b", Value::Integer(2)), ("a", Value::Integer(1))]);
        assert_eq!(
            map.call_method("keys", &CallArgs::new()).unwrap(),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(
            map.call_method("get", &CallArgs::new().arg("z").arg(0i64))
                .unwrap(),
            Value::Integer(0)
        );
    }

    #[test]
    fn test_missing_attribute() {
        let err = Value::Integer(3).get_attr("upper").unwrap_err();
        assert_eq!(err.to_string(), "'integer' object has no attribute 'upper'");
        assert!(!Value::Integer(3).has_attr("upper"));
        assert!(Value::from("x").has_attr("upper"));
    }

    #[test]
    fn test_bound_method_repr_and_call() {
        let bound = Value::from("ab").get_attr("upper").unwrap();
        assert!(bound.is_callable());
        assert_eq!(bound.repr(), "<bound method string.upper of 'ab'>");
        assert_eq!(bound.call(&CallArgs::new()).unwrap(), Value::from("AB"));
    }

    #[test]
    fn test_call_non_callable() {
        let err = Value::Integer(1).call(&CallArgs::new()).unwrap_err();
        assert_eq!(err, ValueError::NotCallable("integer".to_string()));
    }

    #[test]
    fn test_builtin_arity_is_checked() {
        let err = Value::from("a")
            .call_method("upper", &CallArgs::new().arg(1i64))
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::ArityMismatch {
                expected: 0,
                actual: 1
            }
        );
    }

    // ===== Item Access Tests =====

    #[test]
    fn test_list_indexing() {
        let list = Value::List(vec![Value::Integer(10), Value::Integer(20)]);
        assert_eq!(list.get_item(&Value::Integer(0)).unwrap(), Value::Integer(10));
        assert_eq!(list.get_item(&Value::Integer(-1)).unwrap(), Value::Integer(20));
        assert_eq!(
            list.get_item(&Value::Integer(2)).unwrap_err(),
            ValueError::IndexOutOfBounds {
                index: 2,
                length: 2
            }
        );
    }

    #[test]
    fn test_string_indexing() {
        let s = Value::from("héllo");
        assert_eq!(s.get_item(&Value::Integer(1)).unwrap(), Value::from("é"));
        assert!(matches!(
            s.get_item(&Value::from("a")),
            Err(ValueError::TypeError { .. })
        ));
    }

    #[test]
    fn test_map_items() {
        let mut map = map_of(&[("a", Value::Integer(1))]);
        assert_eq!(map.get_item(&Value::from("a")).unwrap(), Value::Integer(1));
        assert_eq!(
            map.get_item(&Value::from("b")).unwrap_err(),
            ValueError::KeyNotFound("b".to_string())
        );
        map.set_item(&Value::from("b"), Value::Integer(2)).unwrap();
        assert_eq!(map.get_item(&Value::from("b")).unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_set_item_on_list() {
        let mut list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        list.set_item(&Value::Integer(-1), Value::Integer(9)).unwrap();
        assert_eq!(list, Value::List(vec![Value::Integer(1), Value::Integer(9)]));
    }

    #[test]
    fn test_scalars_are_not_subscriptable() {
        assert_eq!(
            Value::Integer(1).get_item(&Value::Integer(0)).unwrap_err(),
            ValueError::NotSubscriptable("integer".to_string())
        );
        let mut s = Value::from("abc");
        assert_eq!(
            s.set_item(&Value::Integer(0), Value::from("z")).unwrap_err(),
            ValueError::NotAssignable("string".to_string())
        );
    }

    // ===== Constructor Tests =====

    #[test]
    fn test_builtin_constructors() {
        let one = |v: Value| CallArgs::new().arg(v);

        assert_eq!(
            ValueKind::Integer.construct(&one(Value::from("42"))).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            ValueKind::Float.construct(&one(Value::Integer(3))).unwrap(),
            Value::Float(3.0)
        );
        assert_eq!(
            ValueKind::List.construct(&one(Value::from("ab"))).unwrap(),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(
            ValueKind::String.construct(&one(Value::Integer(7))).unwrap(),
            Value::from("7")
        );
        assert_eq!(
            ValueKind::Boolean.construct(&CallArgs::new()).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            ValueKind::Map
                .construct(&CallArgs::new().kwarg("x", 1i64))
                .unwrap(),
            map_of(&[("x", Value::Integer(1))])
        );
    }

    #[test]
    fn test_constructor_failures() {
        assert!(matches!(
            ValueKind::Integer.construct(&CallArgs::new().arg("forty")),
            Err(ValueError::ConversionError { to: "integer", .. })
        ));
        assert!(matches!(
            ValueKind::List.construct(&CallArgs::new().kwarg("x", 1i64)),
            Err(ValueError::InvalidOperation(_))
        ));
        assert_eq!(
            ValueKind::List
                .construct(&CallArgs::new().arg(1i64).arg(2i64))
                .unwrap_err(),
            ValueError::ArityMismatch {
                expected: 1,
                actual: 2
            }
        );
        assert!(ValueKind::Object.construct(&CallArgs::new()).is_err());
    }

    #[test]
    fn test_integer_from_float_truncates_within_range() {
        let from_float = |x: f64| ValueKind::Integer.construct(&CallArgs::new().arg(x));

        assert_eq!(from_float(-2.9).unwrap(), Value::Integer(-2));
        assert_eq!(from_float(i64::MIN as f64).unwrap(), Value::Integer(i64::MIN));

        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, 2f64.powi(63)] {
            assert!(
                matches!(
                    from_float(x),
                    Err(ValueError::ConversionError { from: "float", to: "integer", .. })
                ),
                "{} should not convert",
                x
            );
        }
    }

    // ===== Call Arguments Tests =====

    #[test]
    fn test_call_args() {
        let mut args = CallArgs::new().arg(1i64).kwarg("wrap", "x");
        assert_eq!(args.len(), 2);
        assert_eq!(args.get(0), Some(&Value::Integer(1)));
        assert_eq!(args.take_named("wrap"), Some(Value::from("x")));
        assert!(args.named("wrap").is_none());
        assert!(args.expect_arity(1).is_ok());
        assert!(args.expect_arity(2).is_err());
    }
}
