use oluk::{bounded, channel, rendezvous, select};
use std::cell::Cell;
use std::thread;
use std::time::Duration;

#[test]
fn test_select_ready_case() {
    let a = bounded::<i32>(1);
    let b = bounded::<i32>(1);
    b.send(20).unwrap();

    let fired = select! {
        v = a => panic!("a is empty: {}", v),
        v = b => assert_eq!(v, 20),
    };
    assert!(fired);
}

#[test]
fn test_select_priority_lowest_index() {
    let a = bounded::<i32>(1);
    let b = bounded::<i32>(1);
    a.send(1).unwrap();
    b.send(2).unwrap();

    let hit = Cell::new(0);
    select! {
        _v = a => hit.set(1),
        _v = b => hit.set(2),
    };
    assert_eq!(hit.get(), 1);

    // b's value survived the first call and fires on the next one.
    select! {
        _v = a => hit.set(1),
        _v = b => hit.set(2),
    };
    assert_eq!(hit.get(), 2);
}

#[test]
fn test_select_single_dispatch() {
    let a = bounded::<i32>(1);
    let b = bounded::<i32>(1);
    a.send(1).unwrap();
    b.send(2).unwrap();

    let count = Cell::new(0);
    select! {
        _v = a => count.set(count.get() + 1),
        _v = b => count.set(count.get() + 1),
    };
    assert_eq!(count.get(), 1);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_blocks_until_ready() {
    let a = bounded::<i32>(1);
    let b = bounded::<i32>(1);

    let tx = b.clone();
    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        tx.send(20).unwrap();
    });

    let got = Cell::new(0);
    let fired = select! {
        v = a => got.set(v),
        v = b => got.set(v),
    };
    assert!(fired);
    assert_eq!(got.get(), 20);
    sender.join().unwrap();
}

#[test]
fn test_select_all_closed_returns_without_dispatch() {
    let a = bounded::<i32>(1);
    let b = bounded::<i32>(1);
    a.close();
    b.close();

    let fired = select! {
        v = a => panic!("a is closed: {}", v),
        v = b => panic!("b is closed: {}", v),
    };
    assert!(!fired);
}

#[test]
fn test_select_drains_closed_channel() {
    // Closed but undrained channels still fire.
    let a = bounded::<i32>(2);
    a.send(1).unwrap();
    a.close();
    let b = bounded::<i32>(1);

    let got = Cell::new(0);
    let fired = select! {
        v = a => got.set(v),
        v = b => panic!("b is empty: {}", v),
    };
    assert!(fired);
    assert_eq!(got.get(), 1);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_rendezvous_case() {
    let ch = rendezvous::<i32>();
    let idle = bounded::<i32>(1);

    let tx = ch.clone();
    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        // Returns only once the selecting thread takes the value.
        tx.send(5)
    });

    let got = Cell::new(0);
    let fired = select! {
        v = ch => got.set(v),
        v = idle => panic!("idle never fires: {}", v),
    };
    assert!(fired);
    assert_eq!(got.get(), 5);
    assert_eq!(sender.join().unwrap(), Ok(()));
}

#[test]
fn test_select_fn_with_explicit_cases() {
    use oluk::select::{Case, SelectCase};

    let a = bounded::<i32>(1);
    a.send(9).unwrap();

    let got = Cell::new(0);
    let mut case = Case::new(&a, |v| got.set(v));
    let fired = oluk::select::select(&mut [&mut case as &mut dyn SelectCase]);
    assert!(fired);
    assert_eq!(got.get(), 9);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_three_channel_types() {
    for capacity in 0..3 {
        let numbers = channel::<i32>(capacity);
        let floats = channel::<f64>(capacity);
        let words = channel::<String>(capacity);

        // The reader reports which arm fired through a side channel.
        let results = channel::<u8>(16);

        let n = numbers.clone();
        let f = floats.clone();
        let w = words.clone();
        let out = results.clone();
        let reader = thread::spawn(move || loop {
            let fired = select! {
                v = n => {
                    assert_eq!(v, 1);
                    out.send(0).unwrap();
                },
                v = f => {
                    assert_eq!(v, 1.5);
                    out.send(1).unwrap();
                },
                v = w => {
                    assert_eq!(v, "hello world");
                    out.send(2).unwrap();
                },
            };
            if !fired {
                break;
            }
        });

        numbers.send(1).unwrap();
        assert_eq!(results.recv(), Some(0));

        floats.send(1.5).unwrap();
        assert_eq!(results.recv(), Some(1));

        words.send("hello world".to_string()).unwrap();
        assert_eq!(results.recv(), Some(2));

        numbers.close();
        floats.close();
        words.close();

        reader.join().unwrap();
    }
}
