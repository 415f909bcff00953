use mediator::Event;
use mediator_macros::event;

#[event(name = "account.changed")]
#[derive(Debug, Clone)]
enum AccountChanged {
    Opened { balance: i64 },
    Closed,
}

#[event]
struct Tick(u64);

fn main() {
    assert_eq!(AccountChanged::NAME, "account.changed");
    assert_eq!(Tick::NAME, "Tick");
    assert!(<Tick as Event>::kind().is::<Tick>());

    let opened = AccountChanged::Opened { balance: 10 };
    let _ = format!("{:?} {:?}", opened.clone(), AccountChanged::Closed);
    assert_eq!(Tick(3).clone().0, 3);
}
