use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rustbean::{
    BeanError, BeanFactory, BeanModel, DataType, FactoryConfig, ModelBuilder, Value, bean_model,
};
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[bean_model]
pub trait Person {
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, value: i64);
    fn name(&self) -> Option<String>;
    fn set_name(&mut self, value: String);
}

#[bean_model(name = "Account")]
trait AccountModel {
    fn owner(&self) -> Option<String>;
    fn set_owner(&mut self, owner: String);
    fn opened(&self) -> Option<DateTime<Utc>>;
    fn tags(&self) -> Option<Vec<String>>;
    fn set_tags(&mut self, tags: Vec<String>);
    fn set_pin(&mut self, pin: i64);
}

#[bean_model(bean = Snapshot, builder = SnapshotDraft)]
trait ReadingsView {
    fn taken_on(&self) -> Option<NaiveDate>;
    fn reference(&self) -> Option<Uuid>;
}

#[bean_model]
trait Measurement {
    fn value(&self) -> Option<f64>;
    fn set_value(&mut self, value: f64);
    fn valid(&self) -> Option<bool>;
    fn set_valid(&mut self, valid: bool);
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn build_without_setters_yields_all_absent_properties() {
    let person = PersonBean::builder().expect("builder").build();
    assert_eq!(person.id(), None);
    assert_eq!(person.name(), None);

    let account = AccountModelBean::builder().expect("builder").build();
    assert_eq!(account.owner(), None);
    assert_eq!(account.opened(), None);
    assert_eq!(account.tags(), None);
}

#[test]
fn set_then_build_round_trips_every_writable_property() {
    let person = PersonBean::builder()
        .expect("builder")
        .id(7)
        .name("Ada")
        .build();
    assert_eq!(person.id(), Some(7));
    assert_eq!(person.name(), Some("Ada".to_string()));

    let measurement = MeasurementBean::builder()
        .expect("builder")
        .value(2.5)
        .valid(true)
        .build();
    assert_eq!(measurement.value(), Some(2.5));
    assert_eq!(measurement.valid(), Some(true));

    let account = AccountModelBean::builder()
        .expect("builder")
        .owner("Ada")
        .tags(vec!["vip".to_string(), "early".to_string()])
        .pin(1234)
        .build();
    assert_eq!(account.tags(), Some(vec!["vip".to_string(), "early".to_string()]));
    assert_eq!(
        account.get_property("pin").expect("pin is declared"),
        Some(&Value::Integer(1234))
    );
}

#[test]
fn clone_is_equal_then_independent() {
    let original = PersonBean::builder()
        .expect("builder")
        .id(1)
        .name("Grace")
        .build();
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(hash_of(&copy), hash_of(&original));

    copy.set_name("Hopper".to_string());
    assert_ne!(copy, original);
    assert_eq!(original.name(), Some("Grace".to_string()));

    let mut original = original;
    let copy = original.clone();
    original.set_id(2);
    assert_ne!(copy, original);
    assert_eq!(copy.id(), Some(1));
}

#[test]
fn equal_values_mean_equal_beans_and_hashes() {
    let a = PersonBean::builder().expect("builder").id(3).name("Lin").build();
    let mut b = PersonBean::builder().expect("builder").id(3).name("Lin").build();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let mut set = HashSet::new();
    set.insert(a.clone());
    assert!(set.contains(&b));

    b.set_id(4);
    assert_ne!(a, b);
    assert!(!set.contains(&b));
}

#[test]
fn rendering_lists_properties_in_declaration_order() {
    let first = PersonBean::builder()
        .expect("builder")
        .id(7)
        .name("Ada")
        .build();
    let second = PersonBean::builder()
        .expect("builder")
        .name("Ada")
        .id(7)
        .build();

    assert_eq!(first.to_string(), "Person[id=7, name=Ada]");
    assert_eq!(first, second);

    let mut second = second;
    second.set_name("Grace".to_string());
    assert_eq!(first.name(), Some("Ada".to_string()));
    assert_ne!(first, second);
}

#[test]
fn model_name_option_controls_identity_and_rendering() {
    let account = AccountModelBean::builder()
        .expect("builder")
        .owner("Ada")
        .build();
    assert_eq!(AccountModelBean::model_id().name(), "Account");
    assert!(account.to_string().starts_with("Account[owner=Ada, opened=null"));
}

#[test]
fn generated_contract_mirrors_the_trait() {
    assert_eq!(PersonBean::PROPERTIES, &["id", "name"]);
    assert_eq!(AccountModelBean::PROPERTIES, &["owner", "opened", "tags", "pin"]);

    let contract = AccountModelBean::contract();
    let declarations = contract.declarations();
    assert_eq!(declarations[1].data_type, DataType::Timestamp);
    assert!(declarations[1].readable && !declarations[1].writable);
    assert_eq!(declarations[2].data_type, DataType::List(Box::new(DataType::Text)));
    assert!(!declarations[3].readable && declarations[3].writable);
}

#[test]
fn builder_phase_may_fill_read_only_properties_by_name() {
    let opened = Utc.with_ymd_and_hms(2023, 9, 1, 8, 30, 0).unwrap();
    let mut builder = AccountModelBean::builder().expect("builder");
    builder
        .set_property("opened", opened)
        .expect("builder writes read-only properties");
    let mut account = builder.build();
    assert_eq!(account.opened(), Some(opened));

    let err = account
        .set_property("opened", Utc::now())
        .expect_err("built bean must not write read-only properties");
    assert!(matches!(err, BeanError::ReadOnlyProperty(_, _)));
    assert_eq!(account.opened(), Some(opened));
}

#[test]
fn indexed_writes_on_built_beans_respect_read_only_properties() {
    let opened = Utc.with_ymd_and_hms(2023, 9, 1, 8, 30, 0).unwrap();
    let mut builder = AccountModelBean::builder().expect("builder");
    builder.set_property("opened", opened).expect("opened");
    let mut account = builder.build();

    let err = account
        .as_dynamic_mut()
        .typed_set::<DateTime<Utc>>(1, Some(Utc::now()))
        .expect_err("opened is read-only once built");
    assert!(matches!(err, BeanError::ReadOnlyProperty(_, _)));
    assert_eq!(account.opened(), Some(opened));

    let err = account
        .as_dynamic_mut()
        .typed_set::<i64>(0, Some(5))
        .expect_err("owner is text");
    assert!(matches!(err, BeanError::TypeMismatch(_)));

    let err = account
        .as_dynamic_mut()
        .typed_set::<i64>(9, Some(5))
        .expect_err("slot out of range");
    assert!(matches!(err, BeanError::InvalidArgument(_)));
    assert_eq!(account.owner(), None);
}

#[test]
fn dynamic_path_rejects_unknown_names_without_side_effects() {
    let mut person = PersonBean::builder().expect("builder").id(9).build();
    let before = person.clone();

    let err = person
        .set_property("age", 36i64)
        .expect_err("age is not declared");
    assert!(matches!(err, BeanError::UnknownProperty(_, _)));
    assert!(matches!(
        person.get_property("age"),
        Err(BeanError::UnknownProperty(_, _))
    ));
    assert_eq!(person, before);

    let mut builder = PersonBean::builder().expect("builder");
    let err = builder
        .set_property("age", 36i64)
        .expect_err("age is not declared");
    assert!(matches!(err, BeanError::UnknownProperty(_, _)));
    assert_eq!(builder.build(), PersonBean::builder().expect("builder").build());
}

#[test]
fn dynamic_path_rejects_type_mismatches() {
    let mut person = PersonBean::builder().expect("builder").build();
    let err = person
        .set_property("id", "seven")
        .expect_err("id is an integer");
    assert!(matches!(err, BeanError::TypeMismatch(_)));
    assert_eq!(person.id(), None);
}

#[test]
fn later_builder_writes_do_not_reach_built_beans() {
    let builder = PersonBean::builder().expect("builder").name("Ada");
    let first = builder.build();
    let builder = builder.name("Grace");
    let second = builder.build();

    assert_eq!(first.name(), Some("Ada".to_string()));
    assert_eq!(second.name(), Some("Grace".to_string()));
}

#[test]
fn read_only_model_builds_degenerate_beans() {
    let draft: SnapshotDraft = Snapshot::builder().expect("builder");
    let snapshot = draft.build();
    assert_eq!(snapshot.taken_on(), None);
    assert_eq!(snapshot.reference(), None);
    assert!(snapshot.as_dynamic().store().is_unset());
}

#[test]
fn isolated_factory_resolves_through_its_own_cache() {
    let factory = BeanFactory::new(FactoryConfig::new().isolated()).expect("factory");
    let builder = factory
        .instantiate_builder::<PersonBean>()
        .expect("builder");
    let person = builder.id(1).build();

    assert_eq!(factory.cache().len(), 1);
    assert!(factory.cache().contains(&PersonBean::model_id()));
    assert_eq!(person.id(), Some(1));

    let global = PersonBean::builder().expect("builder").id(1).build();
    assert_eq!(person, global);
}

#[test]
fn beans_convert_into_dynamic_beans() {
    let person = PersonBean::builder().expect("builder").id(5).build();
    let dynamic: rustbean::DynamicBean = person.clone().into();
    assert_eq!(dynamic.get_as::<i64>("id").expect("id"), Some(5));
    assert_eq!(PersonBean::from_dynamic(dynamic), person);
}
