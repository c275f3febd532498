use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tfi2opm::{Bank, Batch, Error, OperatorSlot};

fn tfi(al: u8, fb: u8) -> [u8; 42] {
    let mut data = [0; 42];
    data[0] = al;
    data[1] = fb;
    data
}

#[test]
fn single_kick_patch() {
    let dir = tempfile::tempdir().unwrap();
    let kick = dir.path().join("kick.tfi");
    fs::write(&kick, tfi(0x05, 0x02)).unwrap();

    let output = dir.path().join("output.opm");
    let conversion = Batch::new(vec![kick]).unwrap().convert(&output);
    assert!(conversion.written.is_ok());

    let expected = "\
//TFI2OPM by raphaelgoulart

@:0 kick
LFO: 0 0 0 0 0
CH: 64 2 5 0 0 120 0
M1: 0 0 0 0 0 0 0 0 0 0 0
C1: 0 0 0 0 0 0 0 0 0 0 0
M2: 0 0 0 0 0 0 0 0 0 0 0
C2: 0 0 0 0 0 0 0 0 0 0 0

";
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.opm");
    fs::write(&output, "stale contents that are longer than the new bank ".repeat(20)).unwrap();

    let lead = dir.path().join("lead.tfi");
    fs::write(&lead, tfi(7, 0)).unwrap();
    Batch::new(vec![lead]).unwrap().convert(&output).written.unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("//TFI2OPM by raphaelgoulart\n\n@:0 lead\n"));
    assert!(!text.contains("stale"));
}

#[test]
fn full_bank_in_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut inputs: Vec<PathBuf> = (0..128u8)
        .map(|i| {
            let path = dir.path().join(format!("voice{}.tfi", i));
            let mut data = tfi(i % 8, i % 7);
            data[2] = i;
            fs::write(&path, data).unwrap();
            path
        })
        .collect();
    inputs.reverse();

    let output = dir.path().join("output.opm");
    let conversion = Batch::new(inputs.clone()).unwrap().convert(&output);
    assert!(conversion.written.is_ok());
    assert_eq!(conversion.failures().count(), 0);

    let bank = Bank::from_opm(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(bank.len(), 128);
    for (i, ins) in bank.instruments().iter().enumerate() {
        assert_eq!(ins.slot(), i);
        assert_eq!(ins.name(), format!("voice{}", i));
        assert_eq!(ins.operator(OperatorSlot::M1).mt, i as u8);
    }

    inputs.push(dir.path().join("voice128.tfi"));
    assert!(matches!(Batch::new(inputs), Err(Error::TooManyInputs(129))));
}

#[test]
fn opm_round_trip_restores_tfi_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mut originals = Vec::new();
    for n in 0..4u8 {
        let mut data = [0; 42];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(13).wrapping_add(n * 61);
        }
        let path = dir.path().join(format!("patch {}.tfi", n));
        fs::write(&path, data).unwrap();
        originals.push(data);
    }

    let paths: Vec<_> = (0..4).map(|n| dir.path().join(format!("patch {}.tfi", n))).collect();
    let output = dir.path().join("output.opm");
    Batch::new(paths).unwrap().convert(&output).written.unwrap();

    let bank = Bank::from_opm(&fs::read_to_string(&output).unwrap()).unwrap();
    let decoded: Vec<_> = bank.instruments().iter().map(|ins| ins.to_bytes()).collect();
    assert_eq!(decoded, originals);
}
