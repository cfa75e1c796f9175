//! Register accessors driven over a recording mock bus

mod common;

use common::{create_mock_registers, create_mock_registers_with, MockError, Operation};
use ctucanfd::catalog::{LookupError, RegisterAddress as Reg};
use ctucanfd::codec::EncodeError;
use ctucanfd::config::{BitOrder, CodecConfig, ReservedBits};
use ctucanfd::interrupt::{Interrupt, InterruptSet};
use ctucanfd::Error;

#[test]
fn reads_identification() {
    let (mut regs, bus) = create_mock_registers();

    let id = regs.read(Reg::DEVICE_ID).unwrap();
    assert_eq!(id.get("device_id"), Some(0xCAFD));
    assert_eq!(id.get("ver_major"), Some(2));
    assert_eq!(id.get("ver_minor"), Some(3));

    assert_eq!(
        bus.operations(),
        vec![Operation::Read {
            offset: 0x0,
            value: 0x0203_CAFD
        }]
    );
}

#[test]
fn every_register_reads_its_own_word() {
    let (mut regs, bus) = create_mock_registers();
    for &reg in Reg::ALL {
        bus.clear_operations();
        regs.read(reg).unwrap();
        assert_eq!(
            bus.operations(),
            vec![Operation::Read {
                offset: reg.word_offset(),
                value: bus.word(reg.word_offset())
            }],
            "{}",
            reg
        );
    }
}

#[test]
fn command_write_does_not_read_first() {
    let (mut regs, bus) = create_mock_registers();

    regs.write(Reg::COMMAND, |w| w.set_bit("rrb", true)).unwrap();

    assert_eq!(
        bus.operations(),
        vec![Operation::Write {
            offset: 0x4,
            value: 1 << 10
        }]
    );
    // strobes clear themselves
    assert_eq!(bus.word(0x4), 0);
}

#[test]
fn modify_keeps_neighbouring_registers() {
    let (mut regs, bus) = create_mock_registers();
    // MODE.fde and STATUS.tbs set
    bus.set_word(0x4, (1 << 4) | (1 << 18));

    regs.modify(Reg::SETTINGS, |_, w| w.set_bit("ena", true))
        .unwrap();

    assert_eq!(bus.writes(), vec![(0x4, (1 << 4) | (1 << 18) | (1 << 30))]);
    let word = regs.read(Reg::MODE).unwrap();
    assert_eq!(word.bit("fde"), Some(true));
    assert_eq!(word.bit("ena"), Some(true));
    assert_eq!(word.bit("rst"), Some(false));
}

#[test]
fn modify_sees_the_current_value() {
    let (mut regs, bus) = create_mock_registers();
    bus.set_word(0x14, 0x0000_8060);

    regs.modify(Reg::EWL, |r, w| {
        let erp = r.get("erp_limit").unwrap_or(0);
        w.set("ewl_limit", erp - 1)
    })
    .unwrap();

    assert_eq!(bus.word(0x14), 0x0000_807f);
}

#[test]
fn modify_clears_reserved_bits() {
    let (mut regs, bus) = create_mock_registers();
    bus.set_word(0xc, 0x39DF_7BDF | (1 << 26) | (1 << 31));

    regs.modify(Reg::BTR_FD, |_, w| w.set("ph1_fd", 1)).unwrap();

    assert_eq!(bus.word(0xc), (0x39DF_7BDF & !(0xf << 22)) | (1 << 22));
}

#[test]
fn modify_can_preserve_reserved_bits() {
    let config = CodecConfig {
        order: BitOrder::Native,
        reserved: ReservedBits::Preserve,
    };
    let (mut regs, bus) = create_mock_registers_with(config);
    bus.set_word(0xc, 1 << 26);

    regs.modify(Reg::BTR, |_, w| w.set("prop", 3)).unwrap();

    assert_eq!(bus.word(0xc), (1 << 26) | 3);
}

#[test]
fn modify_does_not_echo_tx_commands() {
    let (mut regs, bus) = create_mock_registers();
    bus.set_word(0x5c, 0xFFFF_FFFF);

    regs.modify(Reg::TX_SETTINGS, |_, w| w.set_bit("bdir", false))
        .unwrap();

    assert_eq!(bus.writes(), vec![(0x5c, 1 << 19)]);
}

#[test]
fn rejected_values_never_reach_the_bus() {
    let (mut regs, bus) = create_mock_registers();

    assert_eq!(
        regs.write(Reg::STATUS, |w| w.set_bit("tbs", true)),
        Err(Error::Encode(EncodeError::WriteToReadOnly { field: "tbs" }))
    );
    assert_eq!(
        regs.write(Reg::COMMAND, |w| w.set("cdo", 2)),
        Err(Error::Encode(EncodeError::InvalidStrobeValue {
            field: "cdo",
            value: 2
        }))
    );
    assert_eq!(
        regs.write(Reg::SJW, |w| w.set("sjw", 16)),
        Err(Error::Encode(EncodeError::Overflow {
            field: "sjw",
            value: 16,
            width: 4
        }))
    );
    assert_eq!(
        regs.write(Reg::TX_PRIORITY, |w| w.set("txt3p", 1)),
        Err(Error::Encode(EncodeError::UnknownField {
            word: Reg::TX_PRIORITY
        }))
    );
    assert!(bus.operations().is_empty());

    // a rejected modify reads but does not write
    assert!(regs.modify(Reg::BTR, |_, w| w.set("prop", 64)).is_err());
    assert!(bus.writes().is_empty());
}

#[test]
fn unresolvable_offsets_never_reach_the_bus() {
    let (mut regs, bus) = create_mock_registers();

    for offset in [0x65, 0x68, 0x80, 0xab, 0xb4, 0xbc, 0xdc, 0xff] {
        assert_eq!(
            regs.read_raw(offset),
            Err(Error::Lookup(LookupError::UnknownAddress(offset))),
            "{:#x}",
            offset
        );
    }
    assert_eq!(
        regs.read_raw(0x150),
        Err(Error::Lookup(LookupError::OutOfRange(0x150)))
    );
    assert_eq!(
        unsafe { regs.write_raw(0x200, 1) },
        Err(Error::Lookup(LookupError::OutOfRange(0x200)))
    );
    assert!(bus.operations().is_empty());
}

#[test]
fn raw_access_uses_the_word_offset() {
    let (mut regs, bus) = create_mock_registers();
    bus.set_word(0x14, 0x0002_0000);

    assert_eq!(regs.read_raw(0x17), Ok(0x0002_0000));
    unsafe { regs.write_raw(0x5e, 1 << 19) }.unwrap();

    assert_eq!(
        bus.operations(),
        vec![
            Operation::Read {
                offset: 0x14,
                value: 0x0002_0000
            },
            Operation::Write {
                offset: 0x5c,
                value: 1 << 19
            },
        ]
    );
}

#[test]
fn bus_failures_are_reported() {
    let (mut regs, bus) = create_mock_registers();

    bus.fail_next_read();
    assert_eq!(
        regs.modify(Reg::BTR, |_, w| w.set("prop", 1)),
        Err(Error::Bus(MockError::Communication))
    );
    assert!(bus.writes().is_empty());

    bus.fail_next_write();
    assert_eq!(regs.reset(), Err(Error::Bus(MockError::Communication)));
    assert!(bus.operations().is_empty());

    // the failures were one-shot
    regs.reset().unwrap();
    assert_eq!(bus.writes(), vec![(0x4, 1)]);
}

#[test]
fn reversed_order_round_trips() {
    let (mut regs, bus) = create_mock_registers_with(CodecConfig::new(BitOrder::Reversed));

    regs.write(Reg::BTR, |w| {
        w.set("prop", 31)?
            .set("ph1", 15)?
            .set("ph2", 15)?
            .set("prop_fd", 31)?
            .set("ph1_fd", 7)?
            .set("ph2_fd", 7)
    })
    .unwrap();

    assert_eq!(bus.word(0xc), 0x7DEF_7DCE);
    let word = regs.read(Reg::BTR_FD).unwrap();
    assert_eq!(word.get("prop"), Some(31));
    assert_eq!(word.get("ph1_fd"), Some(7));
    assert_eq!(word.get("ph2_fd"), Some(7));
}

#[test]
fn tx_data_words() {
    let (mut regs, bus) = create_mock_registers();

    for n in 1..=20_u8 {
        let reg = Reg::tx_data(n).unwrap();
        let field = format!("tx_data_{}", n);
        regs.write(reg, |w| w.set(&field, u32::from(n) << 24)).unwrap();
    }

    let writes = bus.writes();
    assert_eq!(writes.len(), 20);
    for (n, (offset, value)) in (1..=20_u32).zip(writes) {
        assert_eq!(offset, 0x100 + 4 * (n as u16 - 1));
        assert_eq!(value, n << 24);
    }
}

#[test]
fn interrupt_enables_do_not_touch_flags() {
    let (mut regs, bus) = create_mock_registers();
    bus.set_word(0x8, (1 << 0) | (1 << 7));

    let flagged = regs.interrupts().unwrap();
    assert_eq!(
        flagged.iter().collect::<Vec<_>>(),
        vec![Interrupt::FrameReceived, Interrupt::BusError]
    );

    let set: InterruptSet = [Interrupt::FrameTransmitted, Interrupt::BusStatusChanged]
        .into_iter()
        .collect();
    regs.set_interrupt_enable(set).unwrap();

    assert_eq!(bus.writes(), vec![(0x8, (1 << 17) | (1 << 26))]);
    assert_eq!(regs.interrupt_enable().unwrap(), set);
}
